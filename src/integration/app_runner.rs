use std::sync::Arc;

use color_eyre::eyre::Result;
use ratatui::prelude::Rect;
use tokio::{
    sync::{mpsc, Mutex},
    task::JoinHandle,
};
use tokio_util::sync::CancellationToken;

use crate::{
    core::{
        cmd::TuiCommand, cmd_executor::CmdExecutor, msg::system::SystemMsg, msg::Msg,
        raw_msg::RawMsg, state::AppState, update,
    },
    infrastructure::{
        config::Config,
        fetch_service::{spawn_cache_observer, FetchService},
        tui::{self, event_source::EventSource, TuiLike},
    },
    integration::elm_integration::ElmRuntime,
    presentation::components::Components,
    repositories::UserRepository,
};

/// Drives the application: terminal events and background results go in,
/// the update cycle runs, and the screen is redrawn
pub struct AppRunner {
    runtime: ElmRuntime,
    tui: Arc<Mutex<dyn TuiLike + Send>>,
    event_source: EventSource,
    events_exhausted: bool,
    // Results from FetchService and the cache observer
    raw_rx: mpsc::UnboundedReceiver<RawMsg>,
    tui_rx: mpsc::UnboundedReceiver<TuiCommand>,
    // For service termination
    cancel_token: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
    components: Components,
}

impl AppRunner {
    /// Wire the runtime to the repository and start the background services
    pub fn new(
        config: Config,
        repository: UserRepository,
        tui: Arc<Mutex<dyn TuiLike + Send>>,
    ) -> Self {
        let (raw_tx, raw_rx) = mpsc::unbounded_channel();
        let (tui_tx, tui_rx) = mpsc::unbounded_channel();

        let (op_tx, cancel_token, fetch_service) =
            FetchService::new(repository.clone(), raw_tx.clone());
        let tasks = vec![
            fetch_service.run(),
            spawn_cache_observer(&repository, raw_tx.clone(), cancel_token.clone()),
        ];

        let mut executor = CmdExecutor::new(op_tx, raw_tx);
        executor.set_tui_sender(tui_tx);

        let mut runtime =
            ElmRuntime::new_with_executor(AppState::new_with_config(config), executor);
        for msg in update::init() {
            runtime.send_msg(msg);
        }

        Self {
            runtime,
            event_source: EventSource::real(Arc::clone(&tui)),
            tui,
            events_exhausted: false,
            raw_rx,
            tui_rx,
            cancel_token,
            tasks,
            components: Components::new(),
        }
    }

    pub fn runtime(&self) -> &ElmRuntime {
        &self.runtime
    }

    pub fn send_msg(&mut self, msg: Msg) {
        self.runtime.send_msg(msg);
    }

    /// Replace the terminal event source (scripted events in tests)
    pub fn set_event_source(&mut self, event_source: EventSource) {
        self.event_source = event_source;
        self.events_exhausted = false;
    }

    pub fn should_quit(&self) -> bool {
        self.runtime.state().system.should_quit
    }

    /// Run until the state asks to quit, then stop the services
    pub async fn run(&mut self) -> Result<()> {
        self.tui.lock().await.enter()?;
        self.process()?;
        self.render().await?;

        while !self.should_quit() {
            self.run_one_cycle().await?;
        }

        self.shutdown().await;
        self.tui.lock().await.exit()?;
        Ok(())
    }

    /// Wait for one terminal event or background result, then run the update
    /// cycle
    pub async fn run_one_cycle(&mut self) -> Result<()> {
        let mut render = false;

        tokio::select! {
            biased;
            event = self.event_source.next(), if !self.events_exhausted => match event {
                Some(event) => render = self.handle_event(event),
                None => {
                    self.events_exhausted = true;
                    if matches!(self.event_source, EventSource::Real(_)) {
                        log::warn!("Terminal event stream closed");
                        self.runtime.send_raw_msg(RawMsg::Quit);
                    }
                }
            },
            Some(raw) = self.raw_rx.recv() => self.runtime.send_raw_msg(raw),
            else => {
                log::warn!("No event sources left");
                self.runtime.send_raw_msg(RawMsg::Quit);
            }
        }

        // Drain everything else that is already waiting
        while let Ok(raw) = self.raw_rx.try_recv() {
            self.runtime.send_raw_msg(raw);
        }

        self.process()?;
        render |= self.apply_tui_commands().await?;
        self.handle_suspend().await?;

        if render {
            self.render().await?;
        }
        Ok(())
    }

    /// Draw the current state
    pub async fn render(&mut self) -> Result<()> {
        let state = self.runtime.state();
        let components = &self.components;
        self.tui
            .lock()
            .await
            .draw(&mut |f: &mut tui::Frame<'_>| components.render(f, state))?;
        Ok(())
    }

    /// Cancel the background services and wait for them to stop
    pub async fn shutdown(&mut self) {
        self.cancel_token.cancel();
        for task in self.tasks.drain(..) {
            if let Err(e) = task.await {
                log::error!("Background task failed: {e}");
            }
        }
    }

    /// Returns whether the event asks for a redraw
    fn handle_event(&mut self, event: tui::Event) -> bool {
        match event {
            tui::Event::Quit => self.runtime.send_raw_msg(RawMsg::Quit),
            tui::Event::Tick => self.runtime.send_raw_msg(RawMsg::Tick),
            tui::Event::Render | tui::Event::Init | tui::Event::FocusGained => return true,
            tui::Event::Resize(w, h) => self.runtime.send_raw_msg(RawMsg::Resize(w, h)),
            tui::Event::Key(key) => self.runtime.send_raw_msg(RawMsg::Key(key)),
            tui::Event::Error => {
                self.runtime
                    .send_raw_msg(RawMsg::Error("Terminal input error".to_string()));
            }
            tui::Event::Closed => self.runtime.send_raw_msg(RawMsg::Quit),
            tui::Event::FocusLost | tui::Event::Paste(_) | tui::Event::Mouse(_) => {}
        }
        false
    }

    fn process(&mut self) -> Result<()> {
        match self.runtime.run_update_cycle() {
            Ok(failures) => {
                for failure in failures {
                    log::error!("Command failed: {failure}");
                }
            }
            Err(e) => {
                log::error!("ElmRuntime error: {e}");
                self.runtime
                    .send_raw_msg(RawMsg::Error(format!("ElmRuntime error: {e}")));
            }
        }
        Ok(())
    }

    async fn apply_tui_commands(&mut self) -> Result<bool> {
        let mut resized = false;
        while let Ok(cmd) = self.tui_rx.try_recv() {
            match cmd {
                TuiCommand::Resize { width, height } => {
                    self.tui.lock().await.resize(Rect::new(0, 0, width, height))?;
                    resized = true;
                }
            }
        }
        Ok(resized)
    }

    async fn handle_suspend(&mut self) -> Result<()> {
        if !self.runtime.state().system.should_suspend {
            return Ok(());
        }
        {
            let mut tui = self.tui.lock().await;
            tui.suspend()?;
            tui.resume()?;
        }
        self.runtime.send_msg(Msg::System(SystemMsg::Resume));
        self.process()?;
        self.render().await
    }
}

impl Drop for AppRunner {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}
