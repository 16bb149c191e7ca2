use anyhow::Result;
use marquee_motion::{
    AnimationId, CounterSpec, EntranceSpec, FixedRateScheduler, FrameScheduler, MotionEngine,
    MotionEvent, StatFormat,
};

/// Simulated stand-in for the page's presentation layer: owns the engine,
/// the registered ids, and every piece of view-local state as instance
/// fields, and feeds the engine synthetic scroll and frame input.
struct DemoShell {
    engine: MotionEngine,
    stats: Vec<(AnimationId, StatFormat, &'static str)>,
    cards: Vec<(String, AnimationId)>,
}

const STATS_SUBJECT: &str = "stats-banner";

impl DemoShell {
    fn mount() -> Result<Self> {
        let mut engine = MotionEngine::new();

        // Stats banner: four counters gated on one anchor subject,
        // staggered by duration
        engine.observe(STATS_SUBJECT, 0.3)?;
        let stat_rows: [(f64, u32, StatFormat, &str); 4] = [
            (2_400_000.0, 1, StatFormat::ScaledMillionsPlus, "Transactions Tracked"),
            (890.0, 0, StatFormat::CurrencyMillions, "Revenue Managed"),
            (40_000.0, 0, StatFormat::ScaledThousandsPlus, "Active Users"),
            (99.9, 1, StatFormat::FixedPercent, "Uptime SLA"),
        ];
        let mut stats = Vec::new();
        for (i, (target, decimals, format, label)) in stat_rows.into_iter().enumerate() {
            let spec = CounterSpec::new(target, 1900.0 + i as f64 * 200.0)?
                .with_decimal_places(decimals);
            let id = engine.gate_counter(spec, STATS_SUBJECT);
            stats.push((id, format, label));
        }

        // Feature cards: each card is its own independently observed
        // subject; the stagger delay composes with per-card triggering
        let mut cards = Vec::new();
        for i in 0..5 {
            let subject = format!("feature-card-{i}");
            engine.observe(&subject, 0.1)?;
            let spec = EntranceSpec::default()
                .with_stagger(i, marquee_motion::DEFAULT_STAGGER_STEP_MS)?;
            let id = engine.gate_entrance(spec, &subject);
            cards.push((subject, id));
        }

        Ok(Self { engine, stats, cards })
    }

    fn print_stats(&self, now_ms: f64) {
        print!("t={now_ms:6.0}ms |");
        for (id, format, _) in &self.stats {
            if let Some(value) = self.engine.counter_value(*id) {
                print!(" {:>8}", format.render(value));
            }
        }
        let settled = self
            .cards
            .iter()
            .filter(|(_, id)| self.engine.entrance_opacity(*id) == Some(1.0))
            .count();
        println!(" | cards settled: {settled}/{}", self.cards.len());
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut shell = DemoShell::mount()?;
    let mut scheduler = FixedRateScheduler::new(1000.0 / 60.0)?;
    let mut next_checkpoint = 0.0;

    // Simulated scroll: the cards enter the viewport one after another as
    // the grid scrolls in, the stats banner a moment later. Re-delivered
    // measurements are inert once a subject has latched.
    while let Some(now_ms) = scheduler.next_frame() {
        for (i, (subject, _)) in shell.cards.iter().enumerate() {
            if now_ms >= 250.0 + i as f64 * 90.0 {
                shell.engine.intersection(subject, 0.4);
            }
        }
        if now_ms >= 800.0 {
            shell.engine.intersection(STATS_SUBJECT, 0.6);
        }

        let active = shell.engine.frame(now_ms);

        for event in shell.engine.drain_events() {
            if let MotionEvent::Reveal(reveal) = event {
                println!("-- revealed: {}", reveal.subject_id());
            }
        }

        if now_ms >= next_checkpoint {
            shell.print_stats(now_ms);
            next_checkpoint += 500.0;
        }

        if now_ms > 800.0 && !active {
            shell.print_stats(now_ms);
            break;
        }
    }

    println!("final:");
    for (id, format, label) in &shell.stats {
        let value = shell.engine.counter_value(*id).unwrap_or(0.0);
        println!("  {:>8}  {label}", format.render(value));
    }

    Ok(())
}
