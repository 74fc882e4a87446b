//! Message types for the converter
//!
//! Hosts drive a [`crate::converter::Converter`] by feeding it these.

use crate::converter::ConvertCommand;
use crate::settings::SettingsChange;
use crate::surface::SurfaceId;

/// Everything a host can tell the converter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// A conversion was requested (shortcut, context menu item, CLI)
    Convert(ConvertCommand),
    /// A surface received focus
    Focus(SurfaceId),
    /// A context menu was opened on a surface
    ContextMenu(SurfaceId),
    /// The stored ignore list changed
    SettingsChanged(SettingsChange),
}
