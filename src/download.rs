//! Download.
//!
//! This module contains the code to download a portable XAMPP archive for a given PHP version.

use anyhow::anyhow;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tracing::{debug, instrument, trace, warn};

/// Build variants (compiler toolchains) a version may be packaged with, in the order they are tried.
pub(crate) const BUILD_VARIANTS: [&str; 3] = ["VS16", "VC15", "VC11"];

/// Base URL of the portable Windows archives.
#[doc(hidden)]
const BASE_URL: &str = "https://sourceforge.net/projects/xampp/files/XAMPP%20Windows";

/// The error type for downloading an archive.
#[derive(Debug, thiserror::Error)]
pub(crate) enum DownloadError {
    /// The destination file could not be created.
    #[error("failed to create {}", .path.display())]
    Create {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// None of the build variants could be downloaded.
    #[error("failed to download PHP {version} (tried {}): {last}", BUILD_VARIANTS.join(", "))]
    Exhausted { version: String, last: String },
}

/// Something that can fetch a URL into a writer.
pub(crate) trait Fetch {
    /// Fetches the given URL and writes the body to `out`, returning the number of bytes written.
    fn fetch(&self, url: &str, out: &mut dyn Write) -> anyhow::Result<u64>;
}

/// [`Fetch`] implementation on top of a blocking HTTP client.
pub(crate) struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Creates a new `HttpFetcher`.
    pub(crate) fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Fetch for HttpFetcher {
    #[instrument(level = "trace", skip(self, out))]
    fn fetch(&self, url: &str, out: &mut dyn Write) -> anyhow::Result<u64> {
        let mut response = self
            .client
            .get(url) //
            .header(reqwest::header::ACCEPT, "application/octet-stream") //
            .send()?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(anyhow!("download status: {status}"));
        }

        let bytes_written = response.copy_to(out)?;
        Ok(bytes_written)
    }
}

/// Returns the URL of the portable archive for the given version and build variant.
pub(crate) fn archive_url(version: &str, variant: &str) -> String {
    format!("{BASE_URL}/{version}/xampp-portable-windows-x64-{version}-0-{variant}.7z/download")
}

/// Downloads the archive for the given version to `dest`, trying each build variant in turn.
///
/// The destination file is recreated for every attempt. If no variant succeeds, it is removed.
#[instrument(err, level = "trace", skip(fetcher))]
pub(crate) fn download_php_version(fetcher: &dyn Fetch, version: &str, dest: &Path) -> Result<(), DownloadError> {
    let mut last = String::new();
    for variant in BUILD_VARIANTS {
        let url = archive_url(version, variant);
        debug!(%url, "trying build variant {variant}");

        let mut file = File::create(dest).map_err(|source| DownloadError::Create {
            path: dest.to_path_buf(),
            source,
        })?;
        let result = fetcher.fetch(&url, &mut file).and_then(|bytes_written| {
            file.flush()?;
            Ok(bytes_written)
        });
        match result {
            Ok(bytes_written) => {
                trace!(bytes_written, variant);
                return Ok(());
            }
            Err(err) => {
                warn!(?err, variant, "failed to download build variant");
                last = format!("{err:#}");
            }
        }
    }

    let _ = fs::remove_file(dest);
    Err(DownloadError::Exhausted {
        version: version.to_string(),
        last,
    })
}

#[cfg(test)]
mod tests {

    use super::*;
    use std::cell::RefCell;
    use tempfile::tempdir;
    use test_log::test;

    // Fetcher that succeeds only for URLs containing the given build variant.
    struct VariantFetcher {
        accept: Option<&'static str>,
        requested: RefCell<Vec<String>>,
    }

    impl VariantFetcher {
        fn new(accept: Option<&'static str>) -> Self {
            Self {
                accept,
                requested: RefCell::new(Vec::new()),
            }
        }
    }

    impl Fetch for VariantFetcher {
        fn fetch(&self, url: &str, out: &mut dyn Write) -> anyhow::Result<u64> {
            self.requested.borrow_mut().push(url.to_string());
            match self.accept {
                Some(variant) if url.contains(&format!("-{variant}.7z")) => {
                    out.write_all(variant.as_bytes())?;
                    Ok(variant.len() as u64)
                }
                _ => {
                    out.write_all(b"partial")?;
                    Err(anyhow!("download status: 404 Not Found"))
                }
            }
        }
    }

    #[test]
    fn url_for_version_and_variant() {
        let url = archive_url("8.1.12", "VS16");
        assert_eq!(
            "https://sourceforge.net/projects/xampp/files/XAMPP%20Windows/8.1.12/xampp-portable-windows-x64-8.1.12-0-VS16.7z/download",
            url
        );
    }

    #[test]
    fn first_variant_succeeds() {
        let tempdir = tempdir().unwrap();
        let dest = tempdir.path().join("downloaded_version.7z");
        let fetcher = VariantFetcher::new(Some("VS16"));

        download_php_version(&fetcher, "8.2.0", &dest).unwrap();
        assert_eq!(1, fetcher.requested.borrow().len());
        assert_eq!(b"VS16".to_vec(), fs::read(&dest).unwrap());
    }

    #[test]
    fn falls_back_in_order() {
        let tempdir = tempdir().unwrap();
        let dest = tempdir.path().join("downloaded_version.7z");
        let fetcher = VariantFetcher::new(Some("VC11"));

        download_php_version(&fetcher, "7.4.33", &dest).unwrap();
        let requested = fetcher.requested.borrow();
        assert_eq!(3, requested.len());
        assert!(requested[0].ends_with("-VS16.7z/download"));
        assert!(requested[1].ends_with("-VC15.7z/download"));
        assert!(requested[2].ends_with("-VC11.7z/download"));
        // partial content of failed attempts is discarded
        assert_eq!(b"VC11".to_vec(), fs::read(&dest).unwrap());
    }

    #[test]
    fn all_variants_fail() {
        let tempdir = tempdir().unwrap();
        let dest = tempdir.path().join("downloaded_version.7z");
        let fetcher = VariantFetcher::new(None);

        let err = download_php_version(&fetcher, "8.1.12", &dest).unwrap_err();
        assert!(matches!(err, DownloadError::Exhausted { .. }));
        assert!(err.to_string().contains("404"));
        assert_eq!(3, fetcher.requested.borrow().len());
        assert!(!dest.exists());
    }

    #[test]
    fn destination_not_creatable() {
        let tempdir = tempdir().unwrap();
        let dest = tempdir.path().join("missing").join("downloaded_version.7z");
        let fetcher = VariantFetcher::new(Some("VS16"));

        let err = download_php_version(&fetcher, "8.1.12", &dest).unwrap_err();
        assert!(matches!(err, DownloadError::Create { .. }));
        assert!(fetcher.requested.borrow().is_empty());
    }
}
