//! # Interactive Menu
//!
//! The text menu behind `pcbuild interactive` (the default command).
//!
//! ## Menu Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Choose an action:                                                      │
//! │  1-5 Select CPU / GPU / RAM / Motherboard / PSU                         │
//! │        │                                                                │
//! │        ├── Manufacturer? ── Name or model? ── listing                   │
//! │        │        ▲                               │ empty                 │
//! │        │        └──── "Try again? (y/n)" ◄──────┘                       │
//! │        │                                                                │
//! │        └── "Choose CPU ID:" ── not a number / unknown id ── re-prompt   │
//! │                                                                         │
//! │  6 Check compatibility    7 Show selection    8 Search                  │
//! │  9 Clear a slot           0 Exit              (end of input also exits) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Input and output are generic so the whole loop runs against in-memory
//! buffers in tests.

use std::io::{BufRead, Write};

use pcbuild_core::{Category, ComponentCatalog, ComponentRecord, CoreError, PcBuilder, SearchFilter};

use crate::error::AppResult;
use crate::render;

/// Whether the menu keeps running after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Outcome of the manufacturer/term filtering dialogue.
enum Listing {
    Found(Vec<ComponentRecord>),
    /// Nothing matched and the user declined to retry.
    Empty,
    /// Input ended.
    Eof,
}

/// Interactive session over one builder.
pub struct Menu<C, R, W> {
    builder: PcBuilder<C>,
    input: R,
    output: W,
}

impl<C, R, W> Menu<C, R, W>
where
    C: ComponentCatalog,
    R: BufRead,
    W: Write,
{
    pub fn new(builder: PcBuilder<C>, input: R, output: W) -> Self {
        Menu {
            builder,
            input,
            output,
        }
    }

    /// Consumes the menu, returning the builder with its final selection.
    pub fn into_builder(self) -> PcBuilder<C> {
        self.builder
    }

    /// Runs until the user exits or input ends.
    ///
    /// ## Errors
    /// Terminal I/O failures and catalog failures. Selection mistakes are
    /// shown to the user and never end the session.
    pub fn run(&mut self) -> AppResult<()> {
        loop {
            self.print_menu()?;

            let Some(choice) = self.prompt("Your choice: ")? else {
                return Ok(());
            };

            let flow = match choice.as_str() {
                "1" => self.select_component(Category::Cpu)?,
                "2" => self.select_component(Category::Gpu)?,
                "3" => self.select_component(Category::Ram)?,
                "4" => self.select_component(Category::Motherboard)?,
                "5" => self.select_component(Category::Psu)?,
                "6" => self.check_compatibility()?,
                "7" => self.show_selection()?,
                "8" => self.search_components()?,
                "9" => self.clear_slot()?,
                "0" => Flow::Quit,
                _ => {
                    writeln!(self.output, "Invalid choice. Try again.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Quit {
                writeln!(self.output, "Goodbye.")?;
                return Ok(());
            }
        }
    }

    fn print_menu(&mut self) -> AppResult<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Choose an action:")?;
        for (number, category) in (1..).zip(Category::ALL) {
            writeln!(self.output, "{}. Select {}", number, category.label())?;
        }
        writeln!(self.output, "6. Check compatibility")?;
        writeln!(self.output, "7. Show selected components")?;
        writeln!(self.output, "8. Search components")?;
        writeln!(self.output, "9. Clear a slot")?;
        writeln!(self.output, "0. Exit")?;
        Ok(())
    }

    /// Writes `text`, reads one line. `None` at end of input.
    fn prompt(&mut self, text: &str) -> AppResult<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn search(&self, filter: &SearchFilter) -> AppResult<Vec<ComponentRecord>> {
        let records = self
            .builder
            .catalog()
            .search(filter)
            .map_err(CoreError::catalog)?;
        Ok(records)
    }

    /// Asks for manufacturer and name/model, lists matches, offers a retry
    /// when nothing matches.
    fn filtered_listing(&mut self, category: Option<Category>) -> AppResult<Listing> {
        loop {
            let Some(manufacturer) = self.prompt("Manufacturer (leave empty for all): ")? else {
                return Ok(Listing::Eof);
            };
            let Some(term) = self.prompt("Name or model (leave empty for all): ")? else {
                return Ok(Listing::Eof);
            };

            let filter = match SearchFilter::new().manufacturer(&manufacturer).term(&term) {
                Ok(filter) => filter,
                Err(err) => {
                    writeln!(self.output, "{err}")?;
                    continue;
                }
            };
            let filter = match category {
                Some(category) => filter.category(category),
                None => filter,
            };

            let records = self.search(&filter)?;
            if !records.is_empty() {
                return Ok(Listing::Found(records));
            }

            writeln!(self.output, "No components match the criteria.")?;
            match self.prompt("Try again? (y/n): ")? {
                None => return Ok(Listing::Eof),
                Some(answer) if answer == "y" => continue,
                Some(_) => return Ok(Listing::Empty),
            }
        }
    }

    fn print_records(&mut self, records: &[ComponentRecord]) -> AppResult<()> {
        for record in records {
            writeln!(self.output, "{}", render::record_line(record))?;
        }
        Ok(())
    }

    fn select_component(&mut self, slot: Category) -> AppResult<Flow> {
        let label = slot.label();

        let records = match self.filtered_listing(Some(slot))? {
            Listing::Found(records) => records,
            Listing::Empty => {
                writeln!(self.output, "No {label} available.")?;
                return Ok(Flow::Continue);
            }
            Listing::Eof => return Ok(Flow::Quit),
        };

        writeln!(self.output, "Available {label}:")?;
        self.print_records(&records)?;

        loop {
            let Some(input) = self.prompt(&format!("Choose {label} ID: "))? else {
                return Ok(Flow::Quit);
            };

            let Ok(id) = input.parse::<i64>() else {
                writeln!(self.output, "Invalid input. Enter a number.")?;
                continue;
            };

            match self.builder.select_slot(slot, id) {
                Ok(component) => {
                    writeln!(self.output, "{label} selected: {}", component.name())?;
                    return Ok(Flow::Continue);
                }
                Err(CoreError::Catalog(source)) => return Err(CoreError::Catalog(source).into()),
                Err(err) => {
                    writeln!(self.output, "Invalid {label} ID: {err}. Try again.")?;
                }
            }
        }
    }

    fn check_compatibility(&mut self) -> AppResult<Flow> {
        let verdict = self.builder.evaluate_compatibility();
        writeln!(self.output, "{}", render::verdict_line(&verdict))?;
        Ok(Flow::Continue)
    }

    fn show_selection(&mut self) -> AppResult<Flow> {
        writeln!(self.output, "Selected components:")?;
        for line in render::selection_lines(&self.builder.snapshot_selection()) {
            writeln!(self.output, "{line}")?;
        }
        Ok(Flow::Continue)
    }

    fn search_components(&mut self) -> AppResult<Flow> {
        loop {
            let Some(key) = self.prompt(
                "Component type (cpu, gpu, ram, motherboard, psu) or empty for all: ",
            )?
            else {
                return Ok(Flow::Quit);
            };

            let category = if key.is_empty() {
                None
            } else {
                match key.parse::<Category>() {
                    Ok(category) => Some(category),
                    Err(_) => {
                        writeln!(self.output, "Unknown component type.")?;
                        continue;
                    }
                }
            };

            match self.filtered_listing(category)? {
                Listing::Found(records) => self.print_records(&records)?,
                Listing::Empty => return Ok(Flow::Continue),
                Listing::Eof => return Ok(Flow::Quit),
            }

            match self.prompt("Search finished. Search again? (y/n): ")? {
                None => return Ok(Flow::Quit),
                Some(answer) if answer == "y" => continue,
                Some(_) => return Ok(Flow::Continue),
            }
        }
    }

    fn clear_slot(&mut self) -> AppResult<Flow> {
        let Some(key) = self.prompt("Slot to clear (cpu, gpu, ram, motherboard, psu): ")? else {
            return Ok(Flow::Quit);
        };

        let Ok(slot) = key.parse::<Category>() else {
            writeln!(self.output, "Unknown component type.")?;
            return Ok(Flow::Continue);
        };

        match self.builder.clear(slot) {
            Some(component) => writeln!(self.output, "Cleared {}: {}", slot.label(), component.name())?,
            None => writeln!(self.output, "{} was not selected.", slot.label())?,
        }
        Ok(Flow::Continue)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
