// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Session driver: applies messages to the model and runs commands on a worker pool.

use crossbeam_channel::{Receiver, Sender};

use crate::mvu::{self, Command, DashboardModel, Msg};

/// Owns the model and the channels to the command workers.
pub struct Dashboard {
    model: DashboardModel,
    cmd_tx: Sender<Command>,
    msg_rx: Receiver<Msg>,
}

impl Dashboard {
    /// Spawn at least two workers (or one per available core).
    pub fn new(model: DashboardModel) -> Self {
        let threads = std::thread::available_parallelism()
            .map(|n| n.get().max(2))
            .unwrap_or(2);
        Self::with_threads(model, threads)
    }

    pub fn with_threads(model: DashboardModel, threads: usize) -> Self {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded::<Command>();
        let (msg_tx, msg_rx) = crossbeam_channel::unbounded::<Msg>();

        for _ in 0..threads.max(1) {
            let cmd_rx = cmd_rx.clone();
            let msg_tx = msg_tx.clone();
            std::thread::spawn(move || {
                for cmd in cmd_rx.iter() {
                    let msg = mvu::run_command(cmd);
                    let _ = msg_tx.send(msg);
                }
            });
        }

        Self {
            model,
            cmd_tx,
            msg_rx,
        }
    }

    pub fn model(&self) -> &DashboardModel {
        &self.model
    }

    /// Apply one message and hand any resulting commands to the workers.
    pub fn dispatch(&mut self, msg: Msg) {
        let mut commands = Vec::new();
        mvu::update(&mut self.model, msg, &mut commands);
        for cmd in commands {
            if self.cmd_tx.send(cmd).is_ok() {
                self.model.pending_commands += 1;
            }
        }
    }

    /// Block until every queued command (and any command it triggers) has finished.
    pub fn run_until_idle(&mut self) {
        while self.model.pending_commands > 0 {
            match self.msg_rx.recv() {
                Ok(msg) => {
                    self.model.pending_commands -= 1;
                    self.dispatch(msg);
                }
                Err(_) => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mvu::Theme;
    use crate::provider::SourceConfig;

    #[test]
    fn refresh_round_trips_through_workers() {
        let model = DashboardModel::new(SourceConfig::Builtin, Theme::Light);
        let mut dash = Dashboard::with_threads(model, 2);

        dash.dispatch(Msg::Refresh);
        assert_eq!(dash.model().pending_commands, 1);
        assert!(dash.model().loading);

        dash.run_until_idle();

        assert_eq!(dash.model().pending_commands, 0);
        assert!(!dash.model().loading);
        assert_eq!(dash.model().collection.len(), 8);
    }

    #[test]
    fn fetch_errors_come_back_as_messages() {
        let dir = tempfile::tempdir().unwrap();
        let source = SourceConfig::File(dir.path().join("missing.json"));
        let mut dash = Dashboard::with_threads(DashboardModel::new(source, Theme::Dark), 1);

        dash.dispatch(Msg::Refresh);
        dash.run_until_idle();

        let error = dash.model().error.as_deref().unwrap();
        assert!(error.starts_with("Failed to load assets"));
        assert!(dash.model().collection.is_empty());
    }
}
