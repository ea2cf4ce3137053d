//! Component lifecycle around the table adapter.
//!
//! States: `Unmounted -> Mounted -> AwaitingAck -> Mounted`. A configuration
//! arrives whole and is decoded synchronously by [`Component::render`]; the
//! only side effects are the resize request on [`Component::mount`] and the
//! value reports named by the [`ReportTrigger`].

use crate::adapter::{DecodedTable, TableAdapter};
use crate::config::{DisplayOptions, RenderPolicy, ReportTrigger};
use crate::error::{Error, Result};
use crate::grid_model::GridModel;
use crate::host::{ComponentValue, HostPort};
use crate::payload::{HostConfig, TablePayload};
use crate::table::Table;

/// Lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentState {
    /// Not yet mounted.
    Unmounted,
    /// Mounted and idle.
    Mounted,
    /// A value was reported on mount and the host has not acknowledged it.
    AwaitingAck,
}

/// Outcome of one render.
#[derive(Debug)]
pub enum Rendered {
    /// The table decoded completely.
    Table(DecodedTable),
    /// Decoding failed; render a marked error state instead of a table.
    Failed(Error),
}

impl Rendered {
    /// The decoded table, if rendering succeeded.
    pub fn table(&self) -> Option<&DecodedTable> {
        match self {
            Self::Table(table) => Some(table),
            Self::Failed(_) => None,
        }
    }
}

struct Loaded {
    payload: TablePayload,
    options: DisplayOptions,
    table: Box<dyn Table>,
}

/// A table component bound to a host.
pub struct Component<H: HostPort> {
    adapter: TableAdapter,
    host: H,
    state: ComponentState,
    loaded: Option<Loaded>,
    selection: Vec<usize>,
    reported_on_mount: bool,
}

impl<H: HostPort> Component<H> {
    /// Create an unmounted component.
    pub fn new(policy: RenderPolicy, host: H) -> Self {
        Self {
            adapter: TableAdapter::new(policy),
            host,
            state: ComponentState::Unmounted,
            loaded: None,
            selection: Vec::new(),
            reported_on_mount: false,
        }
    }

    /// Current lifecycle state.
    #[inline]
    pub fn state(&self) -> ComponentState {
        self.state
    }

    /// The adapter in use.
    #[inline]
    pub fn adapter(&self) -> &TableAdapter {
        &self.adapter
    }

    /// The host port.
    #[inline]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host port.
    #[inline]
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Current selection, ascending.
    #[inline]
    pub fn selection(&self) -> &[usize] {
        &self.selection
    }

    /// Replace the configuration and decode it.
    ///
    /// The previous configuration and selection are dropped first, so a
    /// failed render leaves nothing stale behind.
    pub fn render(&mut self, config: HostConfig) -> Rendered {
        self.loaded = None;
        self.selection.clear();
        self.reported_on_mount = false;

        let HostConfig { data, options } = config;
        let result = data.decode().and_then(|table| {
            let decoded = self.adapter.decode(table.as_ref(), &options)?;
            Ok((table, decoded))
        });

        match result {
            Ok((table, decoded)) => {
                self.loaded = Some(Loaded {
                    payload: data,
                    options,
                    table,
                });
                Rendered::Table(decoded)
            }
            Err(err) if err.is_data_integrity() => {
                log::error!("table data is corrupted: {err}");
                Rendered::Failed(err)
            }
            Err(err) => {
                log::warn!("table render failed: {err}");
                Rendered::Failed(err)
            }
        }
    }

    /// Mount, or re-run the mount effects after a render.
    ///
    /// Requests a resize on every call. Announces readiness on the first
    /// mount. Under [`ReportTrigger::OnMount`] reports the unmodified table
    /// once per successfully rendered configuration and waits for an
    /// acknowledgement.
    ///
    /// # Errors
    ///
    /// Host transport errors.
    pub fn mount(&mut self) -> Result<()> {
        self.host.request_resize(self.adapter.policy().frame_height)?;

        if self.state == ComponentState::Unmounted {
            self.host.announce_ready()?;
            self.state = ComponentState::Mounted;
        }

        if self.adapter.policy().report == ReportTrigger::OnMount && !self.reported_on_mount {
            if let Some(loaded) = &self.loaded {
                self.host
                    .report_value(ComponentValue::Table(loaded.payload.clone()))?;
                self.reported_on_mount = true;
                self.state = ComponentState::AwaitingAck;
            }
        }
        Ok(())
    }

    /// Host acknowledged the last report.
    pub fn acknowledge(&mut self) {
        if self.state == ComponentState::AwaitingAck {
            self.state = ComponentState::Mounted;
        }
    }

    /// Apply a selection of data row ids.
    ///
    /// Ids are zero-based data rows. They are deduplicated and sorted; an
    /// unchanged selection reports nothing. Returns whether a value was
    /// reported.
    ///
    /// # Errors
    ///
    /// [`Error::NotRendered`] without a loaded table,
    /// [`Error::InvalidSelection`] for ids past the last data row, and host
    /// transport errors.
    pub fn select_rows(&mut self, rows: impl IntoIterator<Item = usize>) -> Result<bool> {
        let loaded = self.loaded.as_ref().ok_or(Error::NotRendered)?;
        let data_rows = loaded.table.data_rows();

        let mut selection: Vec<usize> = rows.into_iter().collect();
        if let Some(&row) = selection.iter().find(|&&row| row >= data_rows) {
            return Err(Error::InvalidSelection { row, data_rows });
        }
        selection.sort_unstable();
        selection.dedup();

        if selection == self.selection {
            return Ok(false);
        }
        self.selection = selection;

        if self.adapter.policy().report != ReportTrigger::OnSelectionChange {
            return Ok(false);
        }
        self.host
            .report_value(ComponentValue::Selection(self.selection.clone()))?;
        Ok(true)
    }

    /// Grid model of the loaded configuration.
    ///
    /// # Errors
    ///
    /// [`Error::NotRendered`] without a loaded table, and decoding errors.
    pub fn grid_model(&self) -> Result<GridModel> {
        let loaded = self.loaded.as_ref().ok_or(Error::NotRendered)?;
        self.adapter
            .build_grid_model(loaded.table.as_ref(), &loaded.options)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::host::{HostMessage, RecordingHost};

    fn config() -> HostConfig {
        serde_json::from_value(json!({
            "data": {
                "format": "grid",
                "header_rows": 1,
                "header_columns": 1,
                "cells": [
                    [{"type": "blank"}, {"type": "columns", "content": "foo"}],
                    [{"type": "index", "content": 0}, {"type": "data", "content": "hey"}],
                    [{"type": "index", "content": 1}, {"type": "data", "content": "what"}]
                ]
            }
        }))
        .unwrap()
    }

    fn corrupted_config() -> HostConfig {
        let mut value = serde_json::to_value(config()).unwrap();
        value["data"]["cells"][2][1]["type"] = json!("???");
        serde_json::from_value(value).unwrap()
    }

    fn component(report: ReportTrigger) -> Component<RecordingHost> {
        Component::new(
            RenderPolicy::default().with_report(report),
            RecordingHost::new(),
        )
    }

    #[test]
    fn test_render_then_mount() {
        let mut c = component(ReportTrigger::OnSelectionChange);
        assert_eq!(c.state(), ComponentState::Unmounted);
        let rendered = c.render(config());
        assert_eq!(rendered.table().unwrap().body.len(), 2);
        c.mount().unwrap();
        assert_eq!(c.state(), ComponentState::Mounted);
        assert_eq!(
            c.host().messages(),
            &[
                HostMessage::SetFrameHeight { height: None },
                HostMessage::ComponentReady
            ]
        );
    }

    #[test]
    fn test_mount_is_idempotent() {
        let mut c = component(ReportTrigger::Never);
        c.render(config());
        c.mount().unwrap();
        c.mount().unwrap();
        c.mount().unwrap();
        assert_eq!(c.host().resize_requests(), vec![None, None, None]);
        let ready = c
            .host()
            .messages()
            .iter()
            .filter(|m| **m == HostMessage::ComponentReady)
            .count();
        assert_eq!(ready, 1);
        assert!(c.host().reported_values().is_empty());
    }

    #[test]
    fn test_fixed_frame_height() {
        let mut c = Component::new(
            RenderPolicy::default().with_frame_height(240),
            RecordingHost::new(),
        );
        c.mount().unwrap();
        assert_eq!(c.host().resize_requests(), vec![Some(240)]);
    }

    #[test]
    fn test_report_on_mount_once_per_configuration() {
        let mut c = component(ReportTrigger::OnMount);
        let cfg = config();
        c.render(cfg.clone());
        c.mount().unwrap();
        assert_eq!(c.state(), ComponentState::AwaitingAck);
        c.mount().unwrap();
        assert_eq!(
            c.host().reported_values(),
            vec![&ComponentValue::Table(cfg.data.clone())]
        );

        c.acknowledge();
        assert_eq!(c.state(), ComponentState::Mounted);

        c.render(cfg);
        c.mount().unwrap();
        assert_eq!(c.host().reported_values().len(), 2);
    }

    #[test]
    fn test_failed_render_reports_nothing() {
        let mut c = component(ReportTrigger::OnMount);
        let rendered = c.render(corrupted_config());
        assert!(matches!(rendered, Rendered::Failed(Error::Decode { .. })));
        c.mount().unwrap();
        assert!(c.host().reported_values().is_empty());
        assert!(matches!(c.grid_model(), Err(Error::NotRendered)));
    }

    #[test]
    fn test_failed_render_drops_previous_table() {
        let mut c = component(ReportTrigger::OnSelectionChange);
        c.render(config());
        c.select_rows([1]).unwrap();
        c.render(corrupted_config());
        assert!(c.selection().is_empty());
        assert!(matches!(c.select_rows([0]), Err(Error::NotRendered)));
    }

    #[test]
    fn test_selection_reports_on_change_only() {
        let mut c = component(ReportTrigger::OnSelectionChange);
        c.render(config());
        assert!(c.select_rows([1, 0, 1]).unwrap());
        assert_eq!(c.selection(), &[0, 1]);
        assert!(!c.select_rows([0, 1]).unwrap());
        assert!(c.select_rows(Vec::new()).unwrap());
        assert_eq!(
            c.host().reported_values(),
            vec![
                &ComponentValue::Selection(vec![0, 1]),
                &ComponentValue::Selection(Vec::new())
            ]
        );
    }

    #[test]
    fn test_selection_out_of_range() {
        let mut c = component(ReportTrigger::OnSelectionChange);
        c.render(config());
        let err = c.select_rows([2]).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidSelection {
                row: 2,
                data_rows: 2
            }
        ));
        assert!(c.host().reported_values().is_empty());
    }

    #[test]
    fn test_selection_without_trigger_is_silent() {
        let mut c = component(ReportTrigger::OnMount);
        c.render(config());
        assert!(!c.select_rows([0]).unwrap());
        assert_eq!(c.selection(), &[0]);
        assert!(c.host().reported_values().is_empty());
    }

    #[test]
    fn test_new_configuration_resets_selection() {
        let mut c = component(ReportTrigger::OnSelectionChange);
        c.render(config());
        c.select_rows([0]).unwrap();
        c.render(config());
        assert!(c.selection().is_empty());
    }

    #[test]
    fn test_grid_model_uses_render_options() {
        let mut c = component(ReportTrigger::Never);
        let cfg = config().with_options(DisplayOptions::new().with_show_index(false));
        c.render(cfg);
        let model = c.grid_model().unwrap();
        assert_eq!(model.column_names().collect::<Vec<_>>(), vec!["foo"]);
        assert_eq!(model.rows[1].get("foo"), Some("what"));
    }
}
