// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! External link helpers.

use anyhow::{Context, Result};
use url::Url;

/// Host serving raw file bytes for cloud-storage share links.
const DIRECT_DOWNLOAD_HOST: &str = "dl.dropboxusercontent.com";

/// Turn a share link into a link that downloads the file directly.
///
/// Cloud-storage share links (`www.dropbox.com/s/...?dl=0`) are moved to the
/// direct-download host with `dl=1`; any other link is returned as parsed.
///
/// # Errors
///
/// Returns an error when `link` is not an absolute URL.
pub fn direct_download_url(link: &str) -> Result<Url> {
    let mut url = Url::parse(link.trim()).with_context(|| format!("Invalid asset link: {link}"))?;

    let is_share_link = url
        .host_str()
        .is_some_and(|h| h == "dropbox.com" || h.ends_with(".dropbox.com"));
    if !is_share_link {
        return Ok(url);
    }

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "dl")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    url.set_host(Some(DIRECT_DOWNLOAD_HOST))
        .context("Failed to rewrite share link host")?;
    {
        let mut query = url.query_pairs_mut();
        query.clear();
        for (k, v) in &pairs {
            query.append_pair(k, v);
        }
        query.append_pair("dl", "1");
    }

    Ok(url)
}
