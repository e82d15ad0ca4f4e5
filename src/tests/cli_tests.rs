use crate::{parse_page_cap, Cli, PageCap};
use clap::Parser;

#[test]
fn page_cap_accepts_numbers_and_all() {
    assert_eq!(parse_page_cap("3"), Ok(PageCap::Limit(3)));
    assert_eq!(parse_page_cap(" 12\n"), Ok(PageCap::Limit(12)));
    assert_eq!(parse_page_cap("ALL"), Ok(PageCap::All));
    assert_eq!(PageCap::All.as_option(), None);
    assert_eq!(PageCap::Limit(4).as_option(), Some(4));
}

#[test]
fn page_cap_rejects_zero_and_text() {
    assert!(parse_page_cap("0").is_err());
    assert!(parse_page_cap("-2").is_err());
    assert!(parse_page_cap("some").is_err());
}

#[test]
fn delay_below_minimum_is_rejected() {
    assert!(Cli::try_parse_from(["listings_scraper", "--delay-ms", "0"]).is_err());
    assert!(Cli::try_parse_from(["listings_scraper", "--delay-ms", "499"]).is_err());
}

#[test]
fn delay_at_minimum_is_accepted() {
    let cli = Cli::try_parse_from(["listings_scraper", "--delay-ms", "500", "--pages", "2"]).unwrap();

    assert_eq!(cli.delay_ms, 500);
    assert_eq!(cli.pages, Some(PageCap::Limit(2)));
}
