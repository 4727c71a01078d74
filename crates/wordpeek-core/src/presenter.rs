use wordpeek_types::{Notice, RequestId, ResultSurface};

/// Everything the router needs from the UI toolkit.
///
/// All methods are called on the UI thread. Answers to confirmations and
/// window dismissals come back as [`wordpeek_types::AppEvent`]s through the
/// router's inbox, never as direct calls.
pub trait Presenter {
    /// Handle to an open result window, owned by the router's registry
    type Surface;
    /// Handle to a "looking up..." indicator
    type Indicator;

    /// Tray tooltip / status line
    fn set_status(&self, status: &str);

    /// Ask yes/no for `text`; the answer arrives as `ConfirmationAnswered`
    fn request_confirmation(&self, request: RequestId, text: &str);

    fn show_indicator(&self, text: &str) -> anyhow::Result<Self::Indicator>;

    fn close_indicator(&self, indicator: Self::Indicator);

    /// Dismissal arrives as `SurfaceDismissed(surface.id)`
    fn open_surface(&self, surface: &ResultSurface) -> anyhow::Result<Self::Surface>;

    fn close_surface(&self, surface: Self::Surface);

    fn notify(&self, notice: Notice);

    /// Stop the UI event loop
    fn quit(&self);
}
