/// Shown for every field the lookup service left empty.
pub const PLACEHOLDER: &str = "—";

/// The four display fields of a successful IP lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpDetails {
    pub address: String,
    pub location: String,
    pub timezone: String,
    pub network: String,
}

/// Visibility and content of the loading indicator, the error banner
/// and the result card.
///
/// The error banner is shared by all flows: the latest message wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusPanel {
    loading: bool,
    error: Option<String>,
    result: Option<IpDetails>,
}

impl StatusPanel {
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The result card is visible if and only if this returns `Some`.
    pub const fn result(&self) -> Option<&IpDetails> {
        self.result.as_ref()
    }

    pub(crate) fn begin_loading(&mut self) {
        self.loading = true;
        self.error = None;
        self.result = None;
    }

    pub(crate) fn end_loading(&mut self) {
        self.loading = false;
    }

    pub(crate) fn show_result(&mut self, details: IpDetails) {
        self.result = Some(details);
    }

    pub(crate) fn show_error(&mut self, msg: impl Into<String>) {
        self.error = Some(msg.into());
    }

    pub(crate) fn hide_error(&mut self) {
        self.error = None;
    }
}
