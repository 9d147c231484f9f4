// src/application/commands/settings_commands.rs
//
// Theme, home summary, connectivity and data wipe

use crate::application::dto::{ClearDataDto, HomeSummaryDto, ThemeDto};
use crate::application::error_handling::ToErrorResponse;
use crate::application::state::AppState;

pub async fn get_theme(state: &AppState) -> Result<ThemeDto, String> {
    Ok(state.theme.current().into())
}

pub async fn toggle_theme(state: &AppState) -> Result<ThemeDto, String> {
    Ok(state.theme.toggle_theme().await.into())
}

pub async fn home_summary(state: &AppState) -> Result<HomeSummaryDto, String> {
    Ok(state.home.summary().await.into())
}

/// Platform reachability report
pub async fn set_connectivity(state: &AppState, connected: bool) -> Result<bool, String> {
    state.connectivity.set_connected(connected);
    Ok(state.connectivity.is_connected())
}

pub async fn clear_all_data(state: &AppState) -> Result<ClearDataDto, String> {
    let favorites_removed = state.data_reset.clear_all_data().await.to_error_response()?;
    Ok(ClearDataDto { favorites_removed })
}
