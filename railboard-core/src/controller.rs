//! Poll loop
//!
//! Composes the link, the fetcher and the board into the
//! `EnsureLink -> Fetch -> Render -> Sleep` cycle and decides which failures
//! are survivable. Link and fetch failures cost one cycle; a display that
//! rejects a draw, or a board that never gets its first link, is fatal.

use alloc::string::ToString;
use core::convert::Infallible;

use railboard_display::{ErrorSink, RenderError, RenderSink};
use railboard_hal::{Clock, DelayNs, HttpClient, WifiLink};

use crate::board::BoardState;
use crate::config::BoardConfig;
use crate::fetch::{DataFetcher, FetchError};
use crate::link::{ConnectError, ConnectivityManager, LinkHandle};
use crate::state::{CycleEvent, Phase};

/// Failures that stop the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FatalError {
    /// No link at startup
    NoLink(ConnectError),
    /// Display rejected an operation
    Display(RenderError),
}

impl core::fmt::Display for FatalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FatalError::NoLink(e) => write!(f, "Wi-Fi connection failed: {}", e),
            FatalError::Display(e) => write!(f, "Display error: {}", e),
        }
    }
}

/// What one poll cycle did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleOutcome {
    /// Board fetched and drawn; `ops` is zero when nothing changed
    Rendered { ops: usize },
    /// No usable data; the board keeps its last contents
    FetchFailed(FetchError),
    /// Link could not be brought up
    LinkDown(ConnectError),
}

/// Departure board main loop
///
/// Owns every collaborator; nothing is shared with other code while the
/// loop runs.
pub struct Controller<'c, W, H, S, D, C> {
    config: &'c BoardConfig,
    link: ConnectivityManager<W>,
    fetcher: DataFetcher<H>,
    board: BoardState,
    sink: S,
    delay: D,
    clock: C,
    phase: Phase,
    /// Link-lost line already shown for the current outage
    link_lost_shown: bool,
}

impl<'c, W, H, S, D, C> Controller<'c, W, H, S, D, C>
where
    W: WifiLink,
    H: HttpClient,
    S: RenderSink + ErrorSink,
    D: DelayNs,
    C: Clock,
{
    /// Create a controller for a validated config
    pub fn new(config: &'c BoardConfig, link: W, http: H, sink: S, delay: D, clock: C) -> Self {
        Self {
            config,
            link: ConnectivityManager::new(link),
            fetcher: DataFetcher::new(http),
            board: BoardState::from_config(config),
            sink,
            delay,
            clock,
            phase: Phase::EnsureLink,
            link_lost_shown: false,
        }
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Board state
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    /// Render sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Connectivity manager
    pub fn connectivity(&self) -> &ConnectivityManager<W> {
        &self.link
    }

    /// Connectivity manager, mutably
    pub fn connectivity_mut(&mut self) -> &mut ConnectivityManager<W> {
        &mut self.link
    }

    /// Data fetcher
    pub fn fetcher(&self) -> &DataFetcher<H> {
        &self.fetcher
    }

    /// Check the display and bring up the first link
    ///
    /// Either failure is shown on the error screen and returned.
    pub fn start(&mut self) -> Result<LinkHandle, FatalError> {
        let config = self.config;
        info!(
            "Starting board {} -> {}",
            config.origin.as_str(),
            config.destination.as_str()
        );

        if let Err(e) = self.sink.flush() {
            return Err(self.fail(FatalError::Display(e)));
        }

        match self.link.ensure_connected(
            &config.wifi,
            config.retry.connect_attempts,
            config.retry.connect_retry_delay_ms,
            &mut self.delay,
        ) {
            Ok(handle) => Ok(handle),
            Err(e) => Err(self.fail(FatalError::NoLink(e))),
        }
    }

    /// Run one full cycle, including its closing sleep
    pub fn run_cycle(&mut self) -> Result<CycleOutcome, FatalError> {
        let config = self.config;
        let started = self.clock.now_ms();
        let mut snapshot = None;
        let mut outcome = CycleOutcome::Rendered { ops: 0 };

        self.phase = Phase::EnsureLink;
        loop {
            trace!("Phase {}", self.phase);
            let event = match self.phase {
                Phase::EnsureLink => match self.link.ensure_connected(
                    &config.wifi,
                    config.retry.connect_attempts,
                    config.retry.connect_retry_delay_ms,
                    &mut self.delay,
                ) {
                    Ok(_) => {
                        if self.link_lost_shown {
                            info!("Link restored");
                            self.link_lost_shown = false;
                        }
                        CycleEvent::LinkUp
                    }
                    Err(e) => {
                        warn!("Link down: {}", e);
                        self.report_link_lost()?;
                        outcome = CycleOutcome::LinkDown(e);
                        CycleEvent::LinkDown
                    }
                },

                Phase::Fetch => match self.fetcher.fetch(
                    &config.request(),
                    &config.api_key,
                    &config.retry,
                    &mut self.delay,
                ) {
                    Ok(fetched) => {
                        snapshot = Some(fetched);
                        CycleEvent::Fetched
                    }
                    Err(e) => {
                        warn!("No data this cycle: {}", e);
                        outcome = CycleOutcome::FetchFailed(e);
                        CycleEvent::FetchFailed
                    }
                },

                Phase::Render => {
                    if let Some(snapshot) = snapshot.take() {
                        let ops = match self.board.render(&snapshot, &mut self.sink) {
                            Ok(ops) => ops,
                            Err(e) => return Err(self.fail(FatalError::Display(e))),
                        };
                        info!("Drew {} changes", ops);
                        outcome = CycleOutcome::Rendered { ops };
                    }
                    CycleEvent::Rendered
                }

                Phase::Sleep => {
                    let wait = match outcome {
                        CycleOutcome::LinkDown(_) => config.timing.reconnect_backoff_ms,
                        _ => {
                            let elapsed = self.clock.elapsed_since(started);
                            let elapsed = u32::try_from(elapsed).unwrap_or(u32::MAX);
                            config.timing.poll_interval_ms.saturating_sub(elapsed)
                        }
                    };
                    debug!("Sleeping {} ms", wait);
                    self.delay.delay_ms(wait);
                    self.phase = self.phase.transition(CycleEvent::Woke);
                    return Ok(outcome);
                }
            };
            self.phase = self.phase.transition(event);
        }
    }

    /// Start, then poll forever
    ///
    /// Only returns on a fatal error, after it has been shown on screen.
    pub fn run(&mut self) -> Result<Infallible, FatalError> {
        self.start()?;
        loop {
            self.run_cycle()?;
        }
    }

    /// Show the link-lost line once per outage
    fn report_link_lost(&mut self) -> Result<(), FatalError> {
        if self.link_lost_shown {
            return Ok(());
        }
        self.link_lost_shown = true;
        let messages = &self.config.messages;
        let shown = self
            .sink
            .append_line(&messages.link_lost, messages.banner_lines)
            .and_then(|()| self.sink.flush());
        match shown {
            Ok(()) => Ok(()),
            Err(e) => Err(self.fail(FatalError::Display(e))),
        }
    }

    /// Put a fatal error on screen
    fn fail(&mut self, error: FatalError) -> FatalError {
        error!("Fatal: {}", error);
        let title = self.config.title();
        if let Err(e) = self.sink.show_fatal(&title, &error.to_string()) {
            error!("Error screen failed: {}", e);
        }
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{MockClock, MockDelay, MockHttp, MockLink, MockReply};
    use railboard_display::{BoardLayout, Column, TextBoard};
    use railboard_hal::TransportError;

    const CONFIG: &str = r#"
        origin = "PAD"
        destination = "RDG"
        rows = 3
        api_key = "secret"

        [wifi]
        ssid = "trackside"
        password = "hunter22"

        [retry]
        connect_attempts = 3
        transport_retries = 1
        parse_retries = 1
        fetch_backoff_ms = 100
        parse_backoff_ms = 50

        [timing]
        poll_interval_ms = 30000
        reconnect_backoff_ms = 5000
    "#;

    const TWO_SERVICES: &str = r#"{"trainServices": [
        { "std": "10:05", "etd": "On time", "destination": [{ "locationName": "Reading" }] },
        { "std": "10:15", "etd": "Delayed", "destination": [{ "locationName": "Didcot Parkway" }],
          "delayReason": "Signal failure" }
    ]}"#;

    const NO_SERVICES: &str = r#"{"locationName": "London Paddington", "crs": "PAD"}"#;

    type TestController<'c> = Controller<'c, MockLink, MockHttp, TextBoard, MockDelay, MockClock>;

    fn config() -> BoardConfig {
        BoardConfig::from_toml(CONFIG).unwrap()
    }

    fn panel(config: &BoardConfig) -> TextBoard {
        TextBoard::new(config.rows, BoardLayout::DEFAULT, &config.title())
    }

    fn controller<'c>(
        config: &'c BoardConfig,
        link: MockLink,
        http: MockHttp,
        clock: &MockClock,
    ) -> (TestController<'c>, MockDelay) {
        let delay = MockDelay::new(clock);
        let controller = Controller::new(
            config,
            link,
            http,
            panel(config),
            delay.clone(),
            clock.clone(),
        );
        (controller, delay)
    }

    fn lines(controller: &TestController<'_>) -> Vec<String> {
        controller.sink().lines().map(String::from).collect()
    }

    #[test]
    fn test_start_without_link_is_fatal() {
        let config = config();
        let clock = MockClock::default();
        let (mut controller, delay) =
            controller(&config, MockLink::new(None), MockHttp::always(TWO_SERVICES), &clock);

        let err = controller.start().unwrap_err();

        assert_eq!(
            err,
            FatalError::NoLink(ConnectError {
                attempts_made: 3,
                cause: None
            })
        );
        assert_eq!(
            controller.sink().fatal(),
            Some(("PAD -> RDG", "Wi-Fi connection failed: no link after 3 attempts"))
        );
        assert_eq!(delay.total_ms(), 2 * 1_000);
    }

    #[test]
    fn test_first_cycle_draws_board() {
        let config = config();
        let clock = MockClock::default();
        let (mut controller, _delay) =
            controller(&config, MockLink::up(), MockHttp::always(TWO_SERVICES), &clock);
        controller.start().unwrap();

        let outcome = controller.run_cycle().unwrap();

        assert_eq!(outcome, CycleOutcome::Rendered { ops: 7 });
        assert_eq!(controller.phase(), Phase::EnsureLink);
        let panel = controller.sink();
        assert_eq!(panel.cell(0, Column::Destination), Some("Reading"));
        assert_eq!(panel.cell(1, Column::Expected), Some("Delayed"));
        assert!(panel.row_is_blank(2));
        assert_eq!(lines(&controller), ["10:15: Signal failure"]);
        let http = controller.fetcher().client();
        assert_eq!(http.last_url.rsplit('/').next(), Some("PAD?numRows=3&filterCRS=RDG"));
        assert_eq!(http.last_api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_unchanged_board_is_not_redrawn() {
        let config = config();
        let clock = MockClock::default();
        let (mut controller, _delay) =
            controller(&config, MockLink::up(), MockHttp::always(TWO_SERVICES), &clock);
        controller.start().unwrap();
        controller.run_cycle().unwrap();
        let flushes = controller.sink().flush_count();

        let outcome = controller.run_cycle().unwrap();

        assert_eq!(outcome, CycleOutcome::Rendered { ops: 0 });
        assert_eq!(controller.sink().flush_count(), flushes);
        assert_eq!(lines(&controller), ["10:15: Signal failure"]);
    }

    #[test]
    fn test_poll_cadence_accounts_for_work() {
        let config = config();
        let clock = MockClock::default();
        let mut http = MockHttp::always(TWO_SERVICES);
        http.latency = Some((clock.clone(), 1_200));
        let (mut controller, delay) = controller(&config, MockLink::up(), http, &clock);
        controller.start().unwrap();
        let before = clock.now_ms();

        controller.run_cycle().unwrap();

        assert_eq!(delay.sleeps().last(), Some(&28_800));
        assert_eq!(clock.now_ms() - before, 30_000);
    }

    #[test]
    fn test_fetch_failure_keeps_board() {
        let config = config();
        let clock = MockClock::default();
        let http = MockHttp::new(
            [MockReply::ok(TWO_SERVICES)],
            MockReply::Fail(TransportError::Timeout),
        );
        let (mut controller, delay) = controller(&config, MockLink::up(), http, &clock);
        controller.start().unwrap();
        controller.run_cycle().unwrap();
        let flushes = controller.sink().flush_count();

        let outcome = controller.run_cycle().unwrap();

        assert_eq!(
            outcome,
            CycleOutcome::FetchFailed(FetchError::Transport {
                attempts: 2,
                last: TransportError::Timeout
            })
        );
        assert_eq!(controller.sink().flush_count(), flushes);
        assert_eq!(controller.sink().cell(0, Column::Destination), Some("Reading"));
        // One backoff, then the rest of the interval
        assert_eq!(delay.sleeps()[delay.sleeps().len() - 2..], [100, 29_900]);
    }

    #[test]
    fn test_no_services_cycle() {
        let config = config();
        let clock = MockClock::default();
        let (mut controller, _delay) =
            controller(&config, MockLink::up(), MockHttp::always(NO_SERVICES), &clock);
        controller.start().unwrap();

        assert_eq!(controller.run_cycle().unwrap(), CycleOutcome::Rendered { ops: 1 });
        assert_eq!(controller.run_cycle().unwrap(), CycleOutcome::Rendered { ops: 0 });

        let lines = lines(&controller);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("There are no direct trains"));
        assert!(controller.board().rendered().empty_notice_shown());
    }

    #[test]
    fn test_link_lost_banner_once_per_outage() {
        let config = config();
        let clock = MockClock::default();
        let (mut controller, delay) =
            controller(&config, MockLink::up(), MockHttp::always(TWO_SERVICES), &clock);
        controller.start().unwrap();
        controller.run_cycle().unwrap();

        // Access point goes away and stays away
        let link = controller.connectivity_mut().link_mut();
        link.drop_link();
        link.up_after_polls = None;

        let outcome = controller.run_cycle().unwrap();
        assert!(matches!(outcome, CycleOutcome::LinkDown(_)));
        assert_eq!(delay.sleeps().last(), Some(&5_000));
        let outcome = controller.run_cycle().unwrap();
        assert!(matches!(outcome, CycleOutcome::LinkDown(_)));

        assert_eq!(
            lines(&controller),
            ["10:15: Signal failure", "Connection lost, reconnecting..."]
        );
        // Board contents survive the outage
        assert_eq!(controller.sink().cell(0, Column::Time), Some("10:05"));

        // Link returns
        controller.connectivity_mut().link_mut().up_after_polls = Some(1);
        assert_eq!(controller.run_cycle().unwrap(), CycleOutcome::Rendered { ops: 0 });

        // A second outage is reported again
        let link = controller.connectivity_mut().link_mut();
        link.drop_link();
        link.up_after_polls = None;
        controller.run_cycle().unwrap();
        assert_eq!(
            lines(&controller),
            [
                "10:15: Signal failure",
                "Connection lost, reconnecting...",
                "Connection lost, reconnecting..."
            ]
        );
    }

    #[test]
    fn test_lost_link_recovered_within_cycle() {
        let config = config();
        let clock = MockClock::default();
        let (mut controller, _delay) =
            controller(&config, MockLink::up(), MockHttp::always(TWO_SERVICES), &clock);
        controller.start().unwrap();
        controller.connectivity_mut().link_mut().drop_link();

        let outcome = controller.run_cycle().unwrap();

        assert_eq!(outcome, CycleOutcome::Rendered { ops: 7 });
        assert_eq!(controller.connectivity().link().connect_calls, 2);
        assert_eq!(controller.connectivity().link().open_sessions, 1);
    }

    #[test]
    fn test_render_failure_is_fatal() {
        let config = config();
        let clock = MockClock::default();
        let delay = MockDelay::new(&clock);
        // Panel with fewer rows than the board expects
        let panel = TextBoard::new(1, BoardLayout::DEFAULT, &config.title());
        let mut controller = Controller::new(
            &config,
            MockLink::up(),
            MockHttp::always(TWO_SERVICES),
            panel,
            delay,
            clock.clone(),
        );

        let err = controller.run().unwrap_err();

        assert_eq!(err, FatalError::Display(RenderError::InvalidCoordinates));
        assert_eq!(
            controller.sink().fatal(),
            Some(("PAD -> RDG", "Display error: display coordinates out of range"))
        );
    }
}
