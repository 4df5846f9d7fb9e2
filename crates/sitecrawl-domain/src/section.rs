//! Report sections

/// Marker prefixing the message of a failed URL in the artifact
pub const ERROR_MARKER: &str = "[ERROR]";

/// Body of one artifact section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionBody {
    /// Cleaned Markdown of the page
    Content(String),

    /// Reason the URL could not be processed
    Error(String),
}

impl SectionBody {
    /// Render the full section, heading included
    ///
    /// # Examples
    ///
    /// ```
    /// use sitecrawl_domain::SectionBody;
    ///
    /// let section = SectionBody::Error("timeout".into()).render("https://a.com/2");
    /// assert_eq!(section, "# https://a.com/2\n\n[ERROR] timeout\n\n");
    /// ```
    pub fn render(&self, url: &str) -> String {
        match self {
            SectionBody::Content(markdown) => {
                format!("# {}\n\n{}\n\n", url, markdown.trim_end())
            }
            SectionBody::Error(message) => {
                // Keep the marker on a single line so consumers can grep for it
                let message = message.replace('\n', " ");
                format!("# {}\n\n{} {}\n\n", url, ERROR_MARKER, message.trim())
            }
        }
    }

    /// Whether this is an error section
    pub fn is_error(&self) -> bool {
        matches!(self, SectionBody::Error(_))
    }
}
