use std::io::{self, BufRead, Write};

use anyhow::Result;
use async_trait::async_trait;
use inquire::{InquireError, Text};
use tokio::sync::mpsc;
use weather_core::WeatherResult;

use crate::render::render_weather;

const QUIT_WORDS: [&str; 3] = ["quit", "exit", "q"];

/// Something that can answer "what's the weather in `city`?".
#[async_trait]
pub trait CityLookup: Send {
    async fn lookup(&mut self, city: &str) -> Option<WeatherResult>;
}

/// Source of city names. `Ok(None)` means the user is done.
#[async_trait]
pub trait CityPrompt: Send {
    async fn next_city(&mut self) -> Result<Option<String>>;
}

/// Terminal prompt; Ctrl-C and Esc end the session.
///
/// The terminal is in raw mode while the prompt is up, so Ctrl-C arrives as a
/// key press rather than a signal.
pub struct InquirePrompt;

#[async_trait]
impl CityPrompt for InquirePrompt {
    async fn next_city(&mut self) -> Result<Option<String>> {
        match Text::new("Enter city name:").prompt() {
            Ok(city) => Ok(Some(city)),
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Plain line reader for piped input; end-of-input ends the session.
///
/// Lines are read on a background thread so a pending read never holds up an
/// interrupt.
pub struct LinePrompt<W> {
    lines: mpsc::UnboundedReceiver<io::Result<String>>,
    out: W,
}

impl<W: Write + Send> LinePrompt<W> {
    pub fn spawn<R>(mut reader: R, out: W) -> Self
    where
        R: BufRead + Send + 'static,
    {
        let (tx, lines) = mpsc::unbounded_channel();
        std::thread::spawn(move || {
            loop {
                let mut line = String::new();
                match reader.read_line(&mut line) {
                    Ok(0) => break,
                    Ok(_) => {
                        if tx.send(Ok(line)).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        let _ = tx.send(Err(e));
                        break;
                    }
                }
            }
        });

        Self { lines, out }
    }
}

#[async_trait]
impl<W: Write + Send> CityPrompt for LinePrompt<W> {
    async fn next_city(&mut self) -> Result<Option<String>> {
        write!(self.out, "\nEnter city name: ")?;
        self.out.flush()?;

        match self.lines.recv().await {
            Some(line) => Ok(Some(line?)),
            None => Ok(None),
        }
    }
}

/// Resolves on Ctrl-C. Never resolves if the signal handler can't be installed.
pub async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}

/// Prompt for cities until a quit word, `interrupt`, or end-of-input.
///
/// `interrupt` is raced against both the prompt and each lookup.
pub async fn run_interactive<L, P, W, I>(
    lookup: &mut L,
    prompt: &mut P,
    out: &mut W,
    interrupt: I,
) -> Result<()>
where
    L: CityLookup,
    P: CityPrompt,
    W: Write,
    I: Future<Output = ()>,
{
    tokio::pin!(interrupt);

    writeln!(out, "\nWelcome to gRPC Weather Client (Interactive Mode)")?;
    writeln!(out, "Type city names to get weather, or 'quit' to exit")?;
    writeln!(out, "{}", "-".repeat(50))?;

    loop {
        let line = tokio::select! {
            _ = &mut interrupt => break,
            line = prompt.next_city() => line?,
        };
        let Some(line) = line else { break };
        let city = line.trim();

        if QUIT_WORDS.contains(&city.to_lowercase().as_str()) {
            break;
        }
        if city.is_empty() {
            writeln!(out, "Please enter a valid city name")?;
            continue;
        }

        let result = tokio::select! {
            _ = &mut interrupt => break,
            result = lookup.lookup(city) => result,
        };
        if let Some(result) = result {
            write!(out, "{}", render_weather(&result))?;
        }
    }

    writeln!(out, "\nGoodbye!")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::pending;
    use std::io::Cursor;
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingLookup {
        cities: Vec<String>,
    }

    #[async_trait]
    impl CityLookup for RecordingLookup {
        async fn lookup(&mut self, city: &str) -> Option<WeatherResult> {
            self.cities.push(city.to_string());
            (city != "Nowhere").then(|| WeatherResult {
                city: city.to_string(),
                country: "Somewhere".into(),
                temperature: "20°C".into(),
                condition: "Sunny".into(),
                humidity: "50%".into(),
                wind_speed: "5.0 km/h".into(),
                last_updated: "2024-01-01 12:00".into(),
            })
        }
    }

    async fn run_with_input(input: &str) -> (RecordingLookup, String) {
        let mut lookup = RecordingLookup::default();
        let mut prompt = LinePrompt::spawn(Cursor::new(input.to_string()), Vec::new());
        let mut out = Vec::new();

        run_interactive(&mut lookup, &mut prompt, &mut out, pending()).await.unwrap();

        (lookup, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn looks_up_each_city_until_quit() {
        let (lookup, out) = run_with_input("London\n  Paris  \nQUIT\nBerlin\n").await;

        assert_eq!(lookup.cities, ["London", "Paris"]);
        assert!(out.contains("Location: London, Somewhere"));
        assert!(out.contains("Location: Paris, Somewhere"));
        assert!(out.trim_end().ends_with("Goodbye!"));
    }

    #[tokio::test]
    async fn end_of_input_ends_session() {
        let (lookup, out) = run_with_input("London").await;

        assert_eq!(lookup.cities, ["London"]);
        assert!(out.contains("Goodbye!"));
    }

    #[tokio::test]
    async fn blank_lines_are_rejected_locally() {
        let (lookup, out) = run_with_input("\n   \nq\n").await;

        assert!(lookup.cities.is_empty());
        assert_eq!(out.matches("Please enter a valid city name").count(), 2);
    }

    #[tokio::test]
    async fn failed_lookup_prints_nothing_and_continues() {
        let (lookup, out) = run_with_input("Nowhere\nexit\n").await;

        assert_eq!(lookup.cities, ["Nowhere"]);
        assert!(!out.contains("Location:"));
    }

    #[tokio::test]
    async fn line_prompt_writes_prompt_and_strips_nothing() {
        let mut out = Vec::new();
        let mut prompt = LinePrompt::spawn(Cursor::new("Rome\n"), &mut out);

        assert_eq!(prompt.next_city().await.unwrap().as_deref(), Some("Rome\n"));
        assert_eq!(prompt.next_city().await.unwrap(), None);
        drop(prompt);

        assert_eq!(String::from_utf8(out).unwrap().matches("Enter city name: ").count(), 2);
    }

    /// A lookup that never answers, like a call stuck on an unresponsive server.
    struct HangingLookup {
        started: bool,
    }

    #[async_trait]
    impl CityLookup for HangingLookup {
        async fn lookup(&mut self, _city: &str) -> Option<WeatherResult> {
            self.started = true;
            pending().await
        }
    }

    /// A prompt that waits forever for the user to type something.
    struct IdlePrompt;

    #[async_trait]
    impl CityPrompt for IdlePrompt {
        async fn next_city(&mut self) -> Result<Option<String>> {
            pending().await
        }
    }

    #[tokio::test]
    async fn interrupt_during_lookup_says_goodbye() {
        let mut lookup = HangingLookup { started: false };
        let mut prompt = LinePrompt::spawn(Cursor::new("London\nParis\n"), Vec::new());
        let mut out = Vec::new();
        let interrupt = tokio::time::sleep(Duration::from_millis(50));

        tokio::time::timeout(
            Duration::from_secs(5),
            run_interactive(&mut lookup, &mut prompt, &mut out, interrupt),
        )
        .await
        .expect("session ended")
        .unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(lookup.started);
        assert!(!out.contains("Location:"));
        assert!(out.trim_end().ends_with("Goodbye!"));
    }

    #[tokio::test]
    async fn interrupt_while_waiting_for_input_says_goodbye() {
        let mut lookup = RecordingLookup::default();
        let mut out = Vec::new();
        let interrupt = tokio::time::sleep(Duration::from_millis(50));

        tokio::time::timeout(
            Duration::from_secs(5),
            run_interactive(&mut lookup, &mut IdlePrompt, &mut out, interrupt),
        )
        .await
        .expect("session ended")
        .unwrap();

        assert!(lookup.cities.is_empty());
        assert!(String::from_utf8(out).unwrap().trim_end().ends_with("Goodbye!"));
    }
}
