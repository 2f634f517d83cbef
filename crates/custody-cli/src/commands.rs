use std::io::{self, Write};

use custody_ledger::{Ledger, LedgerReader, UpdatePolicy, Verdict};
use custody_types::{CustodyStatus, Record};

use crate::cli::{Cli, Command, DemoArgs};
use crate::config::CliConfig;
use crate::render::Renderer;
use crate::session::Session;

pub fn run_command(cli: Cli, config: CliConfig) -> anyhow::Result<()> {
    let renderer = Renderer::new(cli.format);
    let mut ledger = Ledger::with_config(config.ledger);
    tracing::debug!(policy = ?ledger.config().update_policy, "ledger ready");

    match cli.command {
        Command::Shell(_) => cmd_shell(&mut ledger, renderer),
        Command::Demo(args) => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            cmd_demo(&mut ledger, renderer, &args, &mut out).map(|_| ())
        }
    }
}

fn cmd_shell(ledger: &mut Ledger, renderer: Renderer) -> anyhow::Result<()> {
    let stdin = io::stdin();
    Session::new(ledger, stdin.lock(), io::stdout(), renderer).run()
}

/// Two units, one status change, and verification after each step.
///
/// With `--tamper`, a copy of the chain has its first entry edited without
/// recomputation and is audited; verified adoption of that copy is refused.
/// Returns the verdict of the last verification performed.
fn cmd_demo(
    ledger: &mut Ledger,
    renderer: Renderer,
    args: &DemoArgs,
    out: &mut dyn Write,
) -> anyhow::Result<Verdict> {
    let policy = ledger.config().update_policy;
    renderer.note(out, &format!("Update policy: {}", policy_label(policy)))?;

    for (name, custodian) in [("A", "M1"), ("B", "M2")] {
        let entry = ledger.append(Record::new(name, custodian, CustodyStatus::Produced)?)?;
        renderer.entry_event(out, "Unit added", Some(ledger.len() - 1), &entry)?;
    }
    renderer.verdict(out, &ledger.verify())?;

    let updated = ledger.update_status("A", CustodyStatus::Shipped)?;
    let index = match policy {
        UpdatePolicy::AppendTransition => ledger.len() - 1,
        UpdatePolicy::RewriteInPlace => 0,
    };
    renderer.entry_event(out, "Unit status updated", Some(index), &updated)?;
    let mut verdict = ledger.verify();
    renderer.verdict(out, &verdict)?;

    renderer.entries(out, ledger.entries().iter().enumerate())?;

    if args.tamper {
        renderer.note(out, "Overwriting entry 0 status without recomputing its commitment")?;
        let mut tampered = ledger.entries().to_vec();
        tampered[0].record.status = CustodyStatus::Delivered;
        verdict = tampered.verify();
        renderer.verdict(out, &verdict)?;
        renderer.audit(out, &tampered.audit())?;
        if let Err(e) = Ledger::from_verified_entries(tampered, ledger.config().clone()) {
            renderer.invalid_input(out, &e.to_string())?;
        }
    }

    Ok(verdict)
}

fn policy_label(policy: UpdatePolicy) -> &'static str {
    match policy {
        UpdatePolicy::AppendTransition => "append transition",
        UpdatePolicy::RewriteInPlace => "rewrite in place",
    }
}
