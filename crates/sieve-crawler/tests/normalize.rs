use proptest::prelude::*;
use sieve_crawler::{in_scope, normalize, ScopeConfig};
use url::Url;

fn page_url() -> impl Strategy<Value = String> {
    r"https?://[a-z]{1,8}\.(ics|cs|stat)\.uci\.edu(/[a-z0-9]{1,6}){0,3}/?"
}

fn root_relative() -> impl Strategy<Value = String> {
    r"/([\\\t\n]/?)?[a-z0-9~_-]{1,8}(/[a-z0-9._-]{1,8}){0,3}(\?[a-z]=[0-9]{1,3})?(#[a-z]{0,4})?"
}

fn any_reference() -> impl Strategy<Value = String> {
    prop_oneof![
        root_relative(),
        r"[a-z0-9./?=]{0,12}",
        r"(\.\./){0,3}[a-z]{1,5}(\.html)?",
        r"//[a-z]{1,6}\.uci\.edu/[a-z]{0,5}",
        r"https?://[a-z]{1,6}\.uci\.edu/(%7[eE])?[a-z]{0,8}(#[a-z]{1,3})?",
        r"mailto:[a-z]{1,5}@uci\.edu",
    ]
}

proptest! {
    #[test]
    fn root_relative_keeps_host(page in page_url(), reference in root_relative()) {
        let link = normalize(&page, &reference).unwrap();
        prop_assert!(link.is_some());
        let link = Url::parse(link.unwrap().as_str()).unwrap();
        let page = Url::parse(&page).unwrap();
        prop_assert_eq!(link.host_str(), page.host_str());
        prop_assert_eq!(link.fragment(), None);
    }

    #[test]
    fn absolute_kept_modulo_fragment(
        page in page_url(),
        absolute in r"https?://[a-z]{1,8}\.uci\.edu(/[a-z0-9]{1,6}){0,3}(\?[a-z]=[0-9])?",
        fragment in r"(#[a-z0-9]{0,5})?",
    ) {
        let link = normalize(&page, &format!("{absolute}{fragment}")).unwrap();
        prop_assert_eq!(link.map(String::from), Some(absolute));
    }

    #[test]
    fn normalization_is_idempotent(page in page_url(), reference in any_reference()) {
        if let Some(link) = normalize(&page, &reference).unwrap() {
            let again = normalize(link.as_str(), link.as_str()).unwrap();
            prop_assert_eq!(again, Some(link));
        }
    }

    #[test]
    fn non_http_schemes_out_of_scope(
        scheme in "(ftp|file|mailto|gopher|ws|data)",
        rest in r"[a-z]{1,6}",
    ) {
        let url = format!("{scheme}://cs.uci.edu/{rest}");
        prop_assert!(!in_scope(&url, &ScopeConfig::default()));
    }

    #[test]
    fn repeated_segments_out_of_scope(
        first in "[a-z]{1,6}",
        middle in "(/[a-z]{1,6}){0,3}",
    ) {
        let url = format!("https://cs.uci.edu/{first}{middle}/{first}");
        prop_assert!(!in_scope(&url, &ScopeConfig::default()));
    }
}
