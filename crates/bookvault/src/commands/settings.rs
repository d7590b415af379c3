use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::settings::{Settings, SettingsStore};
use crate::store::backend::StorageBackend;

/// Saves the page cap and unit as typed into the settings form.
///
/// A cap that is blank or not a number saves as `0` (disabled); a blank unit saves as
/// `"pages"`.
pub fn run<B: StorageBackend>(
    store: &SettingsStore<B>,
    page_cap: &str,
    page_unit: &str,
) -> Result<CmdResult> {
    let cap = page_cap.trim().parse::<f64>().unwrap_or(0.0);
    let saved = store.save(&Settings::new(cap, page_unit))?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("Settings saved."));
    result.settings = Some(saved);
    Ok(result)
}
