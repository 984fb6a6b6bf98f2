use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use crate::application::LedgerService;
use crate::domain::{TransactionKind, format_currency, parse_amount};

/// One option picked from the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddIncome,
    AddExpense,
    ShowBudget,
    AnalyzeExpenses,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::AddIncome),
            "2" => Some(MenuChoice::AddExpense),
            "3" => Some(MenuChoice::ShowBudget),
            "4" => Some(MenuChoice::AnalyzeExpenses),
            "5" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Where the interactive loop currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    MenuDisplayed,
    AwaitingIncomeInput,
    AwaitingExpenseInput,
    Terminated,
}

/// Interactive menu session over arbitrary input and output streams.
pub struct Session<'a, R, W> {
    service: &'a mut LedgerService,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(service: &'a mut LedgerService, input: R, output: W) -> Self {
        Self {
            service,
            input,
            output,
        }
    }

    /// Run the menu until the user exits or the input ends.
    /// Only terminal I/O failures are returned as errors.
    pub fn run(&mut self) -> Result<()> {
        let mut state = MenuState::MenuDisplayed;
        loop {
            state = match state {
                MenuState::MenuDisplayed => self.menu()?,
                MenuState::AwaitingIncomeInput => self.add_transaction(TransactionKind::Income)?,
                MenuState::AwaitingExpenseInput => {
                    self.add_transaction(TransactionKind::Expense)?
                }
                MenuState::Terminated => break,
            };
        }
        tracing::debug!("session terminated");
        Ok(())
    }

    fn menu(&mut self) -> Result<MenuState> {
        writeln!(self.output)?;
        writeln!(self.output, "Budget Tracker")?;
        writeln!(self.output, "1. Add Income")?;
        writeln!(self.output, "2. Add Expense")?;
        writeln!(self.output, "3. Calculate Budget")?;
        writeln!(self.output, "4. Analyze Expenses")?;
        writeln!(self.output, "5. Exit")?;

        let Some(line) = self.prompt("Choose an option: ")? else {
            return Ok(MenuState::Terminated);
        };

        let next = match MenuChoice::parse(&line) {
            Some(MenuChoice::AddIncome) => MenuState::AwaitingIncomeInput,
            Some(MenuChoice::AddExpense) => MenuState::AwaitingExpenseInput,
            Some(MenuChoice::ShowBudget) => {
                self.show_budget()?;
                MenuState::MenuDisplayed
            }
            Some(MenuChoice::AnalyzeExpenses) => {
                self.show_expense_analysis()?;
                MenuState::MenuDisplayed
            }
            Some(MenuChoice::Exit) => MenuState::Terminated,
            None => {
                writeln!(self.output, "Invalid choice. Please try again.")?;
                MenuState::MenuDisplayed
            }
        };
        Ok(next)
    }

    fn add_transaction(&mut self, kind: TransactionKind) -> Result<MenuState> {
        let category = loop {
            let Some(line) = self.prompt(&format!("Enter {} category: ", kind))? else {
                return Ok(MenuState::Terminated);
            };
            if line.trim().is_empty() {
                writeln!(self.output, "Category cannot be empty. Please try again.")?;
                continue;
            }
            break line;
        };

        let amount_cents = loop {
            let Some(line) = self.prompt(&format!("Enter {} amount: ", kind))? else {
                return Ok(MenuState::Terminated);
            };
            match parse_amount(&line) {
                Ok(cents) => break cents,
                Err(e) => {
                    tracing::debug!(input = %line.trim(), "rejected amount: {}", e);
                    writeln!(self.output, "Invalid amount: {}. Please try again.", e)?;
                }
            }
        };

        match self.service.record(kind, &category, amount_cents) {
            Ok(_) => writeln!(self.output, "{} added successfully.", kind.label())?,
            Err(e) => writeln!(self.output, "Error: {}", e)?,
        }
        Ok(MenuState::MenuDisplayed)
    }

    fn show_budget(&mut self) -> Result<()> {
        let balance = self.service.balance();
        writeln!(self.output, "Remaining Budget: {}", format_currency(balance))?;
        Ok(())
    }

    fn show_expense_analysis(&mut self) -> Result<()> {
        let totals = self.service.expenses_by_category();
        writeln!(self.output, "Expense Analysis:")?;
        if totals.is_empty() {
            writeln!(self.output, "No expenses recorded.")?;
        }
        for (category, cents) in &totals {
            writeln!(self.output, "{}: {}", category, format_currency(*cents))?;
        }
        Ok(())
    }

    /// Print a prompt and read one line. Returns `None` at end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush().context("Failed to flush output")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }

        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }
}
