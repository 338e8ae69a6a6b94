use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail};
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use sieve_crawler::{
    scope, CrawlerConfig, FetchResult, Headers, Normalizer, PageOutcome, PageProcessor,
};
use sieve_store::Corpus;

/// Focused crawler decision core
#[derive(Debug, Parser)]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub cmd: SubCommand,
    /// When quiet no logs are outputted
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Debug, clap::Subcommand)]
pub enum SubCommand {
    #[command(name = "check")]
    Check(CheckArgs),
    #[command(name = "scrap")]
    Scrap(ScrapArgs),
    #[command(hide = true)]
    Completion,
}

#[derive(Debug, clap::Args)]
pub struct ConfigArgs {
    /// Optional crawler yaml configuration file
    #[arg(env = "SIEVE_CONFIG", long)]
    pub config: Option<PathBuf>,
    /// Override the minimum text to content ratio of kept pages
    #[arg(long)]
    pub min_text_ratio: Option<f64>,
    /// Override the minimum text length of kept pages
    #[arg(long)]
    pub min_text_length: Option<usize>,
    /// Override the corpus log path
    #[arg(long)]
    pub corpus_log: Option<PathBuf>,
    /// Override the word frequency snapshot path
    #[arg(long)]
    pub frequencies: Option<PathBuf>,
}

impl TryFrom<&ConfigArgs> for CrawlerConfig {
    type Error = anyhow::Error;

    fn try_from(args: &ConfigArgs) -> Result<Self, Self::Error> {
        let mut conf = if let Some(file) = args.config.as_ref().map(File::open) {
            serde_yaml::from_reader(file?)?
        } else {
            CrawlerConfig::default()
        };
        if let Some(min_text_ratio) = args.min_text_ratio {
            conf.quality.min_text_ratio = min_text_ratio;
        }
        if let Some(min_text_length) = args.min_text_length {
            conf.quality.min_text_length = min_text_length;
        }
        if let Some(corpus_log) = &args.corpus_log {
            conf.store.corpus_log = corpus_log.clone();
        }
        if let Some(frequencies) = &args.frequencies {
            conf.store.frequencies = frequencies.clone();
        }
        Ok(conf)
    }
}

/// Print whether URLs are in scope, and why not
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
    /// Page the URLs were found on, they are normalized against it first
    #[arg(long)]
    pub base: Option<String>,
    /// URLs to check
    #[arg(required = true)]
    pub urls: Vec<String>,
}

pub fn check(args: CheckArgs) -> anyhow::Result<()> {
    let conf = CrawlerConfig::try_from(&args.config)?;
    let normalizer = args.base.as_deref().map(Normalizer::new).transpose()?;

    for url in &args.urls {
        let link = match &normalizer {
            Some(normalizer) => normalizer.normalize(url).map(String::from),
            None => Some(url.trim().to_string()),
        };
        match link {
            None => println!("SKIP\t{url}"),
            Some(link) => match scope::check(&link, &conf.scope) {
                Ok(()) => println!("ACCEPT\t{link}"),
                Err(rejection) => println!("REJECT\t{link}\t{rejection}"),
            },
        }
    }

    Ok(())
}

/// Process a single page and print the links worth following
#[derive(Debug, clap::Args)]
#[command(group = clap::ArgGroup::new("page").required(true))]
pub struct ScrapArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
    /// URL the page was fetched from, defaults to `--url`
    #[arg(long, required_unless_present = "url")]
    pub page_url: Option<String>,
    /// A local html page to process
    #[arg(group = "page", long)]
    pub file: Option<PathBuf>,
    /// A distant page to download and process
    #[arg(group = "page", long)]
    pub url: Option<String>,
    /// Custom user agent to download the page
    #[arg(long, conflicts_with = "file")]
    pub ua: Option<String>,
}

pub fn scrap(args: ScrapArgs) -> anyhow::Result<()> {
    let conf = CrawlerConfig::try_from(&args.config)?;

    let (page_url, fetch) = if let Some(url) = args.url {
        let fetch = download(&url, args.ua.as_deref())?;
        (args.page_url.unwrap_or(url), fetch)
    } else if let Some(path) = args.file {
        let page_url = args
            .page_url
            .ok_or_else(|| anyhow!("Missing `page-url` for {}", path.display()))?;
        let fetch = local_page(&path, &page_url)?;
        (page_url, fetch)
    } else {
        bail!("Missing `url` or `file`");
    };

    let processor = PageProcessor::from(&conf);
    let mut corpus = Corpus::open(&conf.store)?;
    log::info!(
        "Recording into {} and {}",
        corpus.log().path().display(),
        corpus.frequencies().path().display()
    );

    match processor.process(&page_url, &fetch, &mut corpus)? {
        PageOutcome::Accepted { links, .. } => {
            for link in links {
                println!("{link}");
            }
        }
        PageOutcome::Uninformative {
            text_length,
            content_length,
        } => {
            log::warn!("Page {page_url} has {text_length} text chars in {content_length} bytes")
        }
        PageOutcome::Inadmissible(reason) => {
            log::warn!("Page {page_url} is inadmissible: {reason}")
        }
    }

    Ok(())
}

fn download(url: &str, ua: Option<&str>) -> anyhow::Result<FetchResult> {
    let mut builder = reqwest::blocking::ClientBuilder::new();
    if let Some(ua) = ua {
        builder = builder.user_agent(ua);
    }
    let client = builder.build()?;
    let resp = client.get(url).send()?;

    let status_code = resp.status().as_u16();
    let resolved_url = resp.url().to_string();
    let headers: Headers = resp
        .headers()
        .iter()
        .filter_map(|(name, value)| Some((name.as_str(), value.to_str().ok()?)))
        .collect();
    let raw_content = resp.bytes()?.to_vec();

    Ok(FetchResult {
        status_code,
        headers,
        raw_content: Some(raw_content),
        resolved_url: Some(resolved_url),
    })
}

fn local_page(path: &Path, page_url: &str) -> anyhow::Result<FetchResult> {
    let raw_content = fs::read(path)?;
    Ok(FetchResult {
        status_code: 200,
        headers: [("content-type", "text/html")].into_iter().collect(),
        raw_content: Some(raw_content),
        resolved_url: Some(page_url.to_string()),
    })
}

fn init_logger(quiet: bool, default_filter: &str) {
    if !quiet {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    match args.cmd {
        SubCommand::Check(cmd) => {
            init_logger(args.quiet, "sieve_crawler=warn");
            check(cmd)
        }
        SubCommand::Scrap(cmd) => {
            init_logger(args.quiet, "sieve_crawler=info,sieve_store=warn");
            scrap(cmd)
        }
        SubCommand::Completion => {
            generate(Shell::Bash, &mut Args::command(), "sieve", &mut io::stdout());
            Ok(())
        }
    }
}
