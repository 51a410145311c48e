use std::sync::Arc;

use alphin::ai::{AiService, MockAiService};
use alphin::app::{App, Page, Route};
use alphin::config::{Config, EnvConfig};
use alphin::events::{EventSink, UiEvent, ViewMode};
use alphin::learning::UnitStatus;
use alphin::pages::starter::{cohort_cards, AuthForm};
use alphin::pages::scenario;
use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

const HELP: &str = "\
commands:
  go <starter|junior|teen|trader>   switch page
  status                            show the current page
  login|signup|parent <email>       starter page forms
  mission <id> | next               junior: open a mission / suggested topics
  explain <topic>                   junior: mission id, trader: concept
  swipe <yes|no> | practice <topic> teen: answer the current card / AI card
  symbol <sym> | amount <n>         trader: order entry
  buy | sell                        trader: place order
  view <trading|scenario>           trader: switch view
  scenario <id> | exit-scenario     trader: scenario simulator
  ask <question> | review           trader: ask Alphin / review last trade
  portfolio                         trader: portfolio review
  quit";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    tracing::info!("🚀 Alphin starting...");

    let env_config = EnvConfig::load();
    let config = Config::load_or_default(&env_config.config_path)?;

    let ai: Arc<dyn AiService> = Arc::new(MockAiService::from_config(&env_config, &config.ai));
    let status = ai.status();
    tracing::info!(
        "AI configured: {} (openai key: {}, anthropic key: {})",
        status.configured,
        status.has_openai_key,
        status.has_anthropic_key
    );

    let (events, event_rx) = EventSink::channel(config.ui.event_buffer);
    let printer = tokio::spawn(print_events(event_rx));

    let mut app = App::new(config, ai, events);
    println!("{}", HELP);
    render(&app);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }
        if let Err(e) = dispatch(&mut app, line).await {
            println!("⚠️  {}", e);
        }
    }

    tracing::info!("Shutting down...");
    drop(app);
    printer.abort();
    Ok(())
}

async fn print_events(mut rx: mpsc::Receiver<UiEvent>) {
    while let Some(event) = rx.recv().await {
        match event {
            UiEvent::AdvisoryShown(msg) => println!("🐬 Alphin says: {}", msg),
            UiEvent::AdvisoryHidden => {}
            UiEvent::PointsChanged(points) => println!("⭐ Points: {}", points),
            UiEvent::BalanceChanged(balance) => println!("💵 Balance: ${:.2}", balance),
            other => tracing::debug!("event: {:?}", other),
        }
    }
}

async fn dispatch(app: &mut App, line: &str) -> Result<()> {
    let (cmd, arg) = match line.split_once(' ') {
        Some((cmd, arg)) => (cmd, arg.trim()),
        None => (line, ""),
    };

    match cmd {
        "help" => println!("{}", HELP),
        "status" => render(app),
        "go" => match Route::from_path(arg) {
            Some(route) => {
                app.navigate(route);
                render(app);
            }
            None => anyhow::bail!("unknown page: {}", arg),
        },
        _ => dispatch_page(app, cmd, arg).await?,
    }
    Ok(())
}

async fn dispatch_page(app: &mut App, cmd: &str, arg: &str) -> Result<()> {
    match (app.page_mut(), cmd) {
        (Page::Starter(page), "login" | "signup" | "parent") => {
            let form = match cmd {
                "login" => AuthForm::Login,
                "signup" => AuthForm::Signup,
                _ => AuthForm::Parent,
            };
            page.toggle(form);
            if let Some(notice) = page.submit(form, arg)? {
                println!("{}", notice);
            }
        }
        (Page::Junior(page), "mission") => {
            // Rejections already surface through the advisory.
            let _ = page.select_mission(arg.parse()?);
        }
        (Page::Junior(page), "explain") => {
            let explanation = page.explain_mission(arg.parse()?).await?;
            println!("{}", explanation.explanation);
        }
        (Page::Junior(page), "next") => {
            for topic in page.suggest_next_topics().await?.next_topics {
                println!("📚 {} ({}, {})", topic.title, topic.difficulty, topic.estimated_time);
            }
        }
        (Page::Teen(page), "swipe") => {
            let answer = match arg {
                "yes" | "true" | "right" => true,
                "no" | "false" | "left" => false,
                other => anyhow::bail!("swipe yes or no, not '{}'", other),
            };
            page.swipe(answer);
            let (n, total) = page.progress();
            println!("Challenge {} of {}: {}", n, total, page.current().question);
        }
        (Page::Teen(page), "practice") => {
            let card = page.practice_challenge(arg).await?;
            println!("{}: {}", card.category, card.question);
        }
        (Page::Trader(page), "symbol") => {
            let quote = page.select_symbol(arg)?;
            println!("{} {} ${:.2}", quote.symbol, quote.name, quote.price);
        }
        (Page::Trader(page), "amount") => page.set_order_amount(arg.parse()?),
        (Page::Trader(page), "buy") => {
            let _ = page.buy();
        }
        (Page::Trader(page), "sell") => {
            let _ = page.sell();
        }
        (Page::Trader(page), "view") => match arg {
            "trading" => page.set_view(ViewMode::Trading),
            "scenario" | "scenarios" => page.set_view(ViewMode::Scenario),
            other => anyhow::bail!("unknown view: {}", other),
        },
        (Page::Trader(page), "scenario") => {
            page.set_view(ViewMode::Scenario);
            page.start_scenario(arg.parse()?)?;
            for line in scenario::SIMULATION_PLACEHOLDER {
                println!("  • {}", line);
            }
        }
        (Page::Trader(page), "exit-scenario") => page.exit_scenario(),
        (Page::Trader(page), "ask") => {
            let reply = page.ask_alphin(arg).await?;
            for s in reply.suggestions {
                println!("  → {}", s);
            }
        }
        (Page::Trader(page), "review") => match page.review_last_trade().await? {
            Some(review) => println!("[{}] {}", review.rating, review.analysis),
            None => println!("No trades to review yet."),
        },
        (Page::Trader(page), "portfolio") => {
            let analysis = page.review_portfolio().await?;
            for insight in analysis.insights {
                println!("  {:?}: {}", insight.kind, insight.message);
            }
        }
        (Page::Trader(page), "explain") => println!("{}", page.explain(arg).await?.explanation),
        (page, cmd) => anyhow::bail!("'{}' is not available on {}", cmd, page.route()),
    }
    Ok(())
}

fn render(app: &App) {
    match app.page() {
        Page::Starter(_) => {
            println!("== Choose Your Path ==");
            for card in cohort_cards() {
                println!("  {} ({}) - {}  [go {}]", card.title, card.ages, card.tagline, card.route);
            }
        }
        Page::Junior(page) => {
            println!("== Alpha Junior Universe ==  ⭐ {}", page.points());
            for mission in page.missions() {
                let marker = match page.status(mission.id) {
                    UnitStatus::Completed => "✅".to_string(),
                    UnitStatus::Unlocked => format!("⭐ {}", mission.reward),
                    UnitStatus::Locked => "🔒".to_string(),
                };
                println!("  [{}] {} {}  {}", mission.id, mission.icon, mission.title, marker);
            }
        }
        Page::Teen(page) => {
            let (n, total) = page.progress();
            let challenge = page.current();
            println!("== Alpha Teen ==  ⚡ {}", page.points());
            println!("Challenge {} of {} {}: {}", n, total, challenge.category, challenge.question);
            if let Some(result) = page.result_card().current() {
                println!("  {}", result);
            }
        }
        Page::Trader(page) => {
            let summary = page.summary();
            println!("== ALPHIN TRADER ==  view: {:?}", page.view());
            println!(
                "{} ${:.2}  amount {}  | Balance ${:.2}  Equity ${:.2}  P/L +${:.2}",
                page.selected_symbol(),
                page.current_price(),
                page.order_amount(),
                summary.balance,
                summary.equity,
                summary.pnl
            );
            match page.chart() {
                Some(chart) => match chart.last() {
                    Some(close) => println!(
                        "  chart: {} daily points, last close {:.2}",
                        chart.points().len(),
                        close.value
                    ),
                    None => println!("  chart: no points"),
                },
                None => println!("  chart unavailable"),
            }
            for pos in page.positions() {
                println!("  {:?} {} x{} @ ${:.2}", pos.side, pos.symbol, pos.quantity, pos.entry_price);
            }
            match page.active_scenario() {
                Some(active) => println!("  scenario: {} {}", active.icon, active.name),
                None if page.view() == ViewMode::Scenario => {
                    for s in page.scenarios() {
                        println!("  [{}] {} {} ({})", s.id, s.icon, s.name, s.difficulty);
                    }
                }
                None => {}
            }
        }
    }
}
