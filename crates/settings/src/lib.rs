//! Settings, theming and notifications for the Ludoteca client.

pub mod notifier;
pub mod settings;
pub mod source;
pub mod template;
pub mod theme;
pub mod toast;

pub use notifier::{LogNotifier, Notifier, ToastNotifier, notifier_for};
pub use settings::{
    ApiSettings, IntegrationSettings, LibrarySettings, Settings, ThemePreset, ThemeSettings,
    UiMessages, UiSettings,
};
pub use source::{Format, SettingsError};
pub use template::fill_template;
pub use theme::ActiveTheme;
pub use toast::{Toast, ToastKind, ToastQueue};
