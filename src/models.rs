use url::Url;

/// Result of fetching the listing page.
///
/// An unreachable page (non-success status) is reported separately from a page
/// that simply has no schema links, so callers can tell the two apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingOutcome {
    /// Absolute URLs of `.zip`/`.xsd` links, in document order.
    Links(Vec<Url>),
    /// The listing page answered with a non-success HTTP status.
    Unavailable { status: u16 },
}

impl ListingOutcome {
    /// Links to process; empty when the listing was unavailable.
    pub fn links(&self) -> &[Url] {
        match self {
            Self::Links(links) => links,
            Self::Unavailable { .. } => &[],
        }
    }
}

/// Result of handling a single link in the downloader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// A file with the same name already exists in the staging directory.
    Skipped,
    /// The file was written. `extracted` holds the number of archive members
    /// written when the file was a ZIP archive.
    Downloaded { bytes: u64, extracted: Option<usize> },
    /// The server answered with a non-success HTTP status.
    Rejected { status: u16 },
}

/// What the collector did with one schema file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectOutcome {
    /// No file of that name existed in the output directory.
    Moved,
    /// The output file had a different digest and was overwritten.
    Replaced,
    /// The output file had the same digest and was left alone.
    Unchanged,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectReport {
    pub moved: usize,
    pub replaced: usize,
    pub unchanged: usize,
}

impl CollectReport {
    pub fn record(&mut self, outcome: CollectOutcome) {
        match outcome {
            CollectOutcome::Moved => self.moved += 1,
            CollectOutcome::Replaced => self.replaced += 1,
            CollectOutcome::Unchanged => self.unchanged += 1,
        }
    }

    /// Number of files written into the output directory.
    pub fn written(&self) -> usize {
        self.moved + self.replaced
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub files_deleted: usize,
    pub dirs_deleted: usize,
}

/// Everything a single run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// `None` when the listing was fetched, the HTTP status otherwise.
    pub listing_status: Option<u16>,
    pub links_found: usize,
    pub downloaded: usize,
    pub skipped: usize,
    pub rejected: usize,
    pub archives_extracted: usize,
    pub collect: CollectReport,
    pub cleanup: CleanupReport,
}

impl RunSummary {
    pub fn new(listing: &ListingOutcome) -> Self {
        let listing_status = match listing {
            ListingOutcome::Links(_) => None,
            ListingOutcome::Unavailable { status } => Some(*status),
        };
        Self {
            listing_status,
            links_found: listing.links().len(),
            downloaded: 0,
            skipped: 0,
            rejected: 0,
            archives_extracted: 0,
            collect: CollectReport::default(),
            cleanup: CleanupReport::default(),
        }
    }

    pub fn record_download(&mut self, outcome: &DownloadOutcome) {
        match outcome {
            DownloadOutcome::Skipped => self.skipped += 1,
            DownloadOutcome::Downloaded { extracted, .. } => {
                self.downloaded += 1;
                if extracted.is_some() {
                    self.archives_extracted += 1;
                }
            }
            DownloadOutcome::Rejected { .. } => self.rejected += 1,
        }
    }

    pub fn listing_unavailable(&self) -> bool {
        self.listing_status.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_listing_has_no_links() {
        let outcome = ListingOutcome::Unavailable { status: 503 };
        assert!(outcome.links().is_empty());

        let summary = RunSummary::new(&outcome);
        assert!(summary.listing_unavailable());
        assert_eq!(summary.listing_status, Some(503));
        assert_eq!(summary.links_found, 0);
    }

    #[test]
    fn test_empty_listing_is_not_unavailable() {
        let summary = RunSummary::new(&ListingOutcome::Links(Vec::new()));
        assert!(!summary.listing_unavailable());
        assert_eq!(summary.links_found, 0);
    }

    #[test]
    fn test_record_download_counts_each_outcome() {
        let mut summary = RunSummary::new(&ListingOutcome::Links(Vec::new()));
        summary.record_download(&DownloadOutcome::Skipped);
        summary.record_download(&DownloadOutcome::Downloaded {
            bytes: 10,
            extracted: Some(2),
        });
        summary.record_download(&DownloadOutcome::Downloaded {
            bytes: 5,
            extracted: None,
        });
        summary.record_download(&DownloadOutcome::Rejected { status: 404 });

        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.downloaded, 2);
        assert_eq!(summary.archives_extracted, 1);
        assert_eq!(summary.rejected, 1);
    }

    #[test]
    fn test_collect_report_written() {
        let mut report = CollectReport::default();
        report.record(CollectOutcome::Moved);
        report.record(CollectOutcome::Replaced);
        report.record(CollectOutcome::Unchanged);
        assert_eq!(report.written(), 2);
        assert_eq!(report.unchanged, 1);
    }
}
