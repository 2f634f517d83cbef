use std::io::{BufRead, Write};

use colored::Colorize;

use custody_ledger::{Ledger, LedgerError, LedgerReader};
use custody_types::Record;

use crate::render::Renderer;

const MENU: &[(&str, &str)] = &[
    ("1", "Add a new unit"),
    ("2", "Update unit status"),
    ("3", "Retrieve unit information"),
    ("4", "Validate the supply chain"),
    ("5", "Exit"),
    ("6", "Show unit history"),
    ("7", "List all entries"),
];

/// Interactive menu loop over a borrowed ledger.
///
/// Reads one choice per line from `input`; end of input behaves like "Exit".
pub struct Session<'a, R, W> {
    ledger: &'a mut Ledger,
    input: R,
    output: W,
    renderer: Renderer,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(ledger: &'a mut Ledger, input: R, output: W, renderer: Renderer) -> Self {
        Self {
            ledger,
            input,
            output,
            renderer,
        }
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            self.menu()?;
            let Some(choice) = self.prompt("Enter your choice (1-7): ")? else {
                break;
            };

            let keep_going = match choice.as_str() {
                "1" => self.add_unit()?,
                "2" => self.update_status()?,
                "3" => self.retrieve()?,
                "4" => self.validate()?,
                "5" => {
                    writeln!(self.output, "Exiting the system.")?;
                    false
                }
                "6" => self.history()?,
                "7" => {
                    self.renderer
                        .entries(&mut self.output, self.ledger.entries().iter().enumerate())?;
                    true
                }
                _ => {
                    writeln!(self.output, "Invalid choice, please select a valid option.")?;
                    true
                }
            };
            if !keep_going {
                break;
            }
        }
        self.output.flush()?;
        Ok(())
    }

    fn menu(&mut self) -> anyhow::Result<()> {
        writeln!(self.output, "\n{}", "Pharma Supply Chain System".bold())?;
        for (key, label) in MENU {
            writeln!(self.output, "{key}. {label}")?;
        }
        Ok(())
    }

    /// Print `label` and read a trimmed line; `None` at end of input.
    fn prompt(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn add_unit(&mut self) -> anyhow::Result<bool> {
        let Some(name) = self.prompt("Enter the unit name: ")? else { return Ok(false) };
        let Some(custodian) = self.prompt("Enter the custodian: ")? else { return Ok(false) };
        let Some(status) =
            self.prompt("Enter the status (e.g., Produced, Shipped, In Transit): ")?
        else {
            return Ok(false);
        };

        let result = Record::new(name, custodian, status)
            .map_err(LedgerError::from)
            .and_then(|record| self.ledger.append(record));
        match result {
            Ok(entry) => {
                let index = self.ledger.len() - 1;
                self.renderer
                    .entry_event(&mut self.output, "Unit added", Some(index), &entry)?;
            }
            Err(e) => self.report(&e)?,
        }
        Ok(true)
    }

    fn update_status(&mut self) -> anyhow::Result<bool> {
        let Some(name) = self.prompt("Enter the unit name to update: ")? else { return Ok(false) };
        let Some(status) = self.prompt("Enter the new status (e.g., Shipped, Delivered): ")? else {
            return Ok(false);
        };

        match self.ledger.update_status(&name, status) {
            Ok(entry) => {
                let index = self
                    .ledger
                    .entries()
                    .iter()
                    .position(|e| e.commitment == entry.commitment);
                self.renderer
                    .entry_event(&mut self.output, "Unit status updated", index, &entry)?;
            }
            Err(e) => self.report(&e)?,
        }
        Ok(true)
    }

    fn retrieve(&mut self) -> anyhow::Result<bool> {
        let Some(name) = self.prompt("Enter the unit name to retrieve information: ")? else {
            return Ok(false);
        };
        match self.ledger.latest(&name) {
            Some(entry) => self.renderer.record(&mut self.output, entry)?,
            None => self.renderer.not_found(&mut self.output, &name)?,
        }
        Ok(true)
    }

    fn validate(&mut self) -> anyhow::Result<bool> {
        let verdict = self.ledger.verify();
        self.renderer.verdict(&mut self.output, &verdict)?;
        if !verdict.is_valid() {
            self.renderer.audit(&mut self.output, &self.ledger.audit())?;
        }
        Ok(true)
    }

    fn history(&mut self) -> anyhow::Result<bool> {
        let Some(name) = self.prompt("Enter the unit name: ")? else { return Ok(false) };
        let trail: Vec<_> = self
            .ledger
            .entries()
            .iter()
            .enumerate()
            .filter(|(_, e)| e.record.name == name)
            .collect();
        if trail.is_empty() {
            self.renderer.not_found(&mut self.output, &name)?;
        } else {
            self.renderer.entries(&mut self.output, trail)?;
        }
        Ok(true)
    }

    fn report(&mut self, error: &LedgerError) -> anyhow::Result<()> {
        match error {
            LedgerError::NotFound { name } => self.renderer.not_found(&mut self.output, name),
            LedgerError::InvalidInput(e) => {
                self.renderer.invalid_input(&mut self.output, &e.to_string())
            }
            LedgerError::Tampered(_) => {
                self.renderer.invalid_input(&mut self.output, &error.to_string())
            }
        }
    }
}
