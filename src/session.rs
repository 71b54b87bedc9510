//! session — интерактивный цикл меню поверх Store и persist.
//!
//! Session владеет Store и конфигурацией; ввод/вывод передаются снаружи
//! (stdin/stdout в бинарнике, Cursor/Vec<u8> в тестах).
//!
//! Состояния: Running -> Exiting. Выход — пункт 3 или закрытый ввод (EOF на приглашении меню).
//! Любая ошибка операции печатается пользователю и прерывает только эту операцию.
//! Наружу (io::Error) уходят только ошибки записи в вывод.

use log::{debug, warn};
use std::io::{self, BufRead, Write};

use crate::config::RabbitConfig;
use crate::consts::{CHOICE_ADD, CHOICE_EXIT, CHOICE_VIEW, MAX_INPUT_LINE};
use crate::error::RabbitError;
use crate::metrics::metrics_snapshot;
use crate::persist::{load_items, save_items};
use crate::store::Store;
use crate::util::{is_blank, parse_strict_int, read_line_bounded, trim_trailing_newline, LineRead};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Running,
    Exiting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    AddItem,
    ViewItems,
    Exit,
}

impl TryFrom<i32> for Choice {
    type Error = i32;

    fn try_from(n: i32) -> Result<Self, Self::Error> {
        match n {
            CHOICE_ADD => Ok(Choice::AddItem),
            CHOICE_VIEW => Ok(Choice::ViewItems),
            CHOICE_EXIT => Ok(Choice::Exit),
            other => Err(other),
        }
    }
}

/// Result of one bounded line read.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Line(String),
    Eof,
    TooLong,
    Failed,
}

/// Print the numbered item list. Returns false (and prints a notice) when there is nothing to show.
pub fn render_items<W: Write>(out: &mut W, store: &Store) -> io::Result<bool> {
    if store.is_empty() {
        writeln!(out, "No items to display.")?;
        return Ok(false);
    }
    writeln!(out, "\nItem List")?;
    for (i, item) in store.list() {
        writeln!(out, "Item {}: Name: {}, Value: {}", i, item.name, item.value)?;
    }
    Ok(true)
}

pub struct Session<R, W> {
    cfg: RabbitConfig,
    store: Store,
    input: R,
    out: W,
    state: State,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(cfg: RabbitConfig, input: R, out: W) -> Self {
        let store = Store::with_capacity(cfg.max_items);
        Self::with_store(cfg, store, input, out)
    }

    pub fn with_store(cfg: RabbitConfig, store: Store, input: R, out: W) -> Self {
        Self {
            cfg,
            store,
            input,
            out,
            state: State::Running,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn into_parts(self) -> (Store, W) {
        (self.store, self.out)
    }

    /// Load the data file and loop until the user exits.
    pub fn run(&mut self) -> io::Result<()> {
        self.start()?;
        while self.state == State::Running {
            self.step()?;
        }
        Ok(())
    }

    /// Populate the store from the data file. Failure only prints a warning.
    pub fn start(&mut self) -> io::Result<()> {
        let path = self.cfg.data_file.clone();
        match load_items(&path, &mut self.store) {
            Ok(rep) => {
                if rep.capacity_reached {
                    writeln!(
                        self.out,
                        "Warning: Maximum item limit reached while loading. Some items were not loaded."
                    )?;
                }
                if rep.loaded > 0 {
                    writeln!(self.out, "Loaded {} item(s) from {}.", rep.loaded, path.display())?;
                }
            }
            Err(e) => {
                debug!("session: load failed: {}", e);
                writeln!(
                    self.out,
                    "Warning: Unable to load items from {}. Starting with an empty list.",
                    path.display()
                )?;
            }
        }
        Ok(())
    }

    /// One menu round: show menu, read a choice, dispatch.
    pub fn step(&mut self) -> io::Result<State> {
        self.show_menu()?;
        match self.read_input("Enter your choice: ")? {
            Input::Eof => {
                debug!("session: input closed, exiting");
                writeln!(self.out)?;
                self.exit()?;
            }
            Input::Failed | Input::TooLong => {
                writeln!(self.out, "Invalid input. Please enter a number.")?
            }
            Input::Line(s) => match parse_strict_int(&s) {
                Err(_) => writeln!(self.out, "Invalid input. Please enter a number.")?,
                Ok(n) => match Choice::try_from(n) {
                    Ok(choice) => self.dispatch(choice)?,
                    Err(_) => writeln!(self.out, "Invalid choice. Please try again.")?,
                },
            },
        }
        Ok(self.state)
    }

    pub fn dispatch(&mut self, choice: Choice) -> io::Result<()> {
        match choice {
            Choice::AddItem => {
                self.add_item()?;
            }
            Choice::ViewItems => {
                self.view_items()?;
            }
            Choice::Exit => self.exit()?,
        }
        Ok(())
    }

    /// Prompt for name and value, add, save. Returns whether an item was added.
    ///
    /// The first invalid field aborts the whole operation; nothing is re-asked.
    pub fn add_item(&mut self) -> io::Result<bool> {
        if self.store.is_full() {
            writeln!(self.out, "Cannot add more items. Maximum reached.")?;
            return Ok(false);
        }

        let name = match self.read_input("Enter item name: ")? {
            Input::Line(s) if !is_blank(trim_trailing_newline(&s)) => {
                trim_trailing_newline(&s).to_string()
            }
            Input::TooLong => {
                writeln!(self.out, "Name is too long. Item not added.")?;
                return Ok(false);
            }
            _ => {
                writeln!(self.out, "Name cannot be empty.")?;
                return Ok(false);
            }
        };

        let value = match self.read_input("Enter item value (integer): ")? {
            Input::Line(s) => parse_strict_int(&s).ok(),
            _ => None,
        };
        let Some(value) = value else {
            writeln!(self.out, "Invalid integer. Item not added.")?;
            return Ok(false);
        };

        match self.store.add(name, value) {
            Ok(()) => {}
            Err(RabbitError::Capacity { .. }) => {
                writeln!(self.out, "Cannot add more items. Maximum reached.")?;
                return Ok(false);
            }
            Err(e) => {
                debug!("session: add rejected: {}", e);
                writeln!(self.out, "Name cannot be empty.")?;
                return Ok(false);
            }
        }
        writeln!(self.out, "Item added successfully!")?;

        if save_items(&self.cfg.data_file, &self.store).is_err() {
            writeln!(
                self.out,
                "Warning: Item added but failed to save to {}.",
                self.cfg.data_file.display()
            )?;
        }
        Ok(true)
    }

    /// Print the list. Returns false when the store is empty.
    pub fn view_items(&mut self) -> io::Result<bool> {
        render_items(&mut self.out, &self.store)
    }

    /// Final save, farewell, transition to Exiting.
    pub fn exit(&mut self) -> io::Result<()> {
        if save_items(&self.cfg.data_file, &self.store).is_err() {
            writeln!(
                self.out,
                "Error saving items to {}. Changes may not persist.",
                self.cfg.data_file.display()
            )?;
        }
        writeln!(self.out, "Exiting...")?;
        self.out.flush()?;
        self.state = State::Exiting;
        debug!("session: metrics at exit: {:?}", metrics_snapshot());
        Ok(())
    }

    fn show_menu(&mut self) -> io::Result<()> {
        write!(
            self.out,
            "\nRabbit Hole--------\n\
             Data that goes deeper.\n\
             1.) Add Item\n\
             2.) View Items\n\
             3.) Exit\n"
        )
    }

    /// Prompt, then read at most MAX_INPUT_LINE bytes of one line.
    /// Read errors count as a failed read, not as a session error.
    fn read_input(&mut self, prompt: &str) -> io::Result<Input> {
        write!(self.out, "{}", prompt)?;
        self.out.flush()?;

        let mut buf = Vec::new();
        match read_line_bounded(&mut self.input, &mut buf, MAX_INPUT_LINE) {
            Ok(LineRead::Line) => Ok(Input::Line(String::from_utf8_lossy(&buf).into_owned())),
            Ok(LineRead::Eof) => Ok(Input::Eof),
            Ok(LineRead::TooLong) => {
                warn!("session: input line longer than {} bytes rejected", MAX_INPUT_LINE);
                Ok(Input::TooLong)
            }
            Err(e) => {
                warn!("session: read failed: {}", e);
                Ok(Input::Failed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_mapping() {
        assert_eq!(Choice::try_from(1), Ok(Choice::AddItem));
        assert_eq!(Choice::try_from(2), Ok(Choice::ViewItems));
        assert_eq!(Choice::try_from(3), Ok(Choice::Exit));
        assert_eq!(Choice::try_from(0), Err(0));
        assert_eq!(Choice::try_from(-3), Err(-3));
    }

    #[test]
    fn render_empty_and_filled() {
        let mut out = Vec::new();
        let mut store = Store::new();
        assert!(!render_items(&mut out, &store).unwrap());
        assert_eq!(String::from_utf8_lossy(&out), "No items to display.\n");

        store.add("Widget", 10).unwrap();
        store.add("Gizmo", -3).unwrap();
        let mut out = Vec::new();
        assert!(render_items(&mut out, &store).unwrap());
        assert_eq!(
            String::from_utf8_lossy(&out),
            "\nItem List\nItem 1: Name: Widget, Value: 10\nItem 2: Name: Gizmo, Value: -3\n"
        );
    }
}
