//! Ad-hoc URL checks against the public sitemap policy.

use crate::{
    log,
    sitemap::{SitemapUrlPolicy, Verdict},
};
use anyhow::{Result, bail};

/// Print the verdict for every URL; fails if any URL is rejected.
pub fn check_urls(urls: &[String]) -> Result<()> {
    let rejected = report(&SitemapUrlPolicy::new(), urls);

    if rejected > 0 {
        bail!("{rejected} of {} urls rejected", urls.len());
    }
    Ok(())
}

/// Log each verdict and return how many URLs were rejected.
fn report(policy: &SitemapUrlPolicy, urls: &[String]) -> usize {
    let mut rejected = 0;
    for url in urls {
        if policy.is_allowed(url) {
            log!("check"; "allowed  {url}");
        } else if let Verdict::Rejected(reason) = policy.check(url) {
            rejected += 1;
            log!("error"; "rejected {url} ({reason})");
        }
    }
    rejected
}
