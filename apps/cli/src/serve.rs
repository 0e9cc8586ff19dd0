use std::time::{Duration, Instant};

use asearch_config::Settings;
use asearch_index::IndexSource;
use asearch_shell::{ShellActions, SystemShell};
use asearchd::{
    AppService, ControlCommand, HostMessage, PanelMessage, QueryDebouncer, WalkDirSource,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdout};

#[derive(Debug)]
enum Flow {
    Continue(Vec<HostMessage>),
    Quit,
}

/// Runs the panel channel: JSON lines from stdin in, JSON lines to stdout out.
pub(crate) async fn run(settings: Settings) -> anyhow::Result<()> {
    let source = WalkDirSource::from_settings(&settings);
    let mut debouncer = QueryDebouncer::new(Duration::from_millis(settings.debounce_ms));
    let mut app = AppService::new(settings, SystemShell);

    // A failed first build is already reported; the panel still opens empty.
    let _ = app.reindex(&source).await;
    app.show_panel();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        let deadline = debouncer.deadline();
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::debug!("stdin closed");
                    break;
                };
                match handle_line(&mut app, &source, &mut debouncer, &line).await {
                    Flow::Continue(replies) => send(&mut stdout, &replies).await?,
                    Flow::Quit => break,
                }
            }
            _ = sleep_until(deadline) => {
                if let Some(text) = debouncer.take_due(Instant::now()) {
                    let replies = app.handle_message(PanelMessage::DoSearch { text });
                    send(&mut stdout, &replies).await?;
                }
            }
        }
    }

    app.close_panel();
    Ok(())
}

async fn handle_line<S: ShellActions, I: IndexSource>(
    app: &mut AppService<S>,
    source: &I,
    debouncer: &mut QueryDebouncer,
    line: &str,
) -> Flow {
    let line = line.trim();
    if line.is_empty() {
        return Flow::Continue(Vec::new());
    }

    if let Some(command) = ControlCommand::parse(line) {
        match command {
            ControlCommand::Show => {
                app.show_panel();
            }
            ControlCommand::Reindex => {
                if let Err(err) = app.reindex(source).await {
                    // Already reported through the shell; the old index stays.
                    tracing::debug!(%err, "reindex request failed");
                }
            }
            ControlCommand::Close => app.close_panel(),
            ControlCommand::Quit => return Flow::Quit,
        }
        return Flow::Continue(Vec::new());
    }

    let replies = match PanelMessage::parse(line) {
        Some(PanelMessage::DoSearch { text }) => match debouncer.push(text, Instant::now()) {
            Some(text) => app.handle_message(PanelMessage::DoSearch { text }),
            None => Vec::new(),
        },
        Some(message) => app.handle_message(message),
        None => Vec::new(),
    };
    Flow::Continue(replies)
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline.into()).await,
        None => std::future::pending().await,
    }
}

async fn send(stdout: &mut Stdout, replies: &[HostMessage]) -> anyhow::Result<()> {
    for reply in replies {
        let mut line = reply.to_line()?;
        line.push('\n');
        stdout.write_all(line.as_bytes()).await?;
    }
    stdout.flush().await?;
    Ok(())
}
