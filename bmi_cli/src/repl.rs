//! Line-oriented interactive session.
//!
//! Each input line is one interaction. Form and history changes go
//! through [`Session::handle`]; everything else only reads the session.

use crate::display::{categories_table, history_table};
use bmi_core::{Config, Error, Event, Result, Session, UnitSystem};
use std::io::{BufRead, Write};
use std::path::PathBuf;

const HELP: &str = "\
Commands:
  units <metric|imperial>   switch unit system (fields take its defaults)
  weight <value>            set weight in the current units
  height <value>            set height in the current units
  calc                      calculate BMI and add it to the history
  reset                     restore default weight and height
  clear                     clear the history
  history                   show the history table
  chart [path]              show the band chart, or write it as SVG
  export [path]             write the history as CSV
  categories                show the category legend
  show                      show form, status, chart and history
  help                      show this help
  quit                      end the session";

/// A parsed input line
#[derive(Debug, PartialEq)]
enum Command {
    Apply(Event),
    History,
    Chart(Option<PathBuf>),
    Export(Option<PathBuf>),
    Categories,
    Show,
    Help,
    Quit,
    Empty,
}

fn parse_value(field: &str, arg: Option<&str>) -> Result<f64> {
    let arg = arg.ok_or_else(|| Error::Usage(format!("usage: {} <value>", field)))?;
    arg.parse::<f64>()
        .map_err(|_| Error::Usage(format!("invalid {} value: {}", field, arg)))
}

fn parse_command(line: &str) -> Result<Command> {
    let mut parts = line.split_whitespace();
    let Some(word) = parts.next() else {
        return Ok(Command::Empty);
    };
    let arg = parts.next();

    let command = match word.to_lowercase().as_str() {
        "units" => {
            let units = arg
                .ok_or_else(|| Error::Usage("usage: units <metric|imperial>".into()))?
                .parse::<UnitSystem>()?;
            Command::Apply(Event::SelectUnits(units))
        }
        "weight" => Command::Apply(Event::SetWeight(parse_value("weight", arg)?)),
        "height" => Command::Apply(Event::SetHeight(parse_value("height", arg)?)),
        "calc" | "calculate" | "submit" => Command::Apply(Event::Submit),
        "reset" => Command::Apply(Event::Reset),
        "clear" => Command::Apply(Event::ClearHistory),
        "history" => Command::History,
        "chart" => Command::Chart(arg.map(PathBuf::from)),
        "export" => Command::Export(arg.map(PathBuf::from)),
        "categories" => Command::Categories,
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => {
            return Err(Error::Usage(format!(
                "unknown command: {} (type 'help')",
                other
            )))
        }
    };
    Ok(command)
}

/// Run a session until `quit` or end of input
pub fn run<R: BufRead, W: Write>(config: &Config, input: R, mut out: W) -> Result<Session> {
    let mut session = Session::new(config);

    writeln!(out, "BMI Calculator (type 'help' for commands)")?;
    write_form(&session, &mut out)?;

    for line in input.lines() {
        let line = line?;
        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => {
                if let Err(e) = execute(&mut session, config, command, &mut out) {
                    writeln!(out, "{}", e.user_message())?;
                }
            }
            Err(e) => writeln!(out, "{}", e.user_message())?,
        }
    }

    tracing::info!(
        session = %session.id(),
        started_at = %session.started_at(),
        calculations = session.history().len(),
        "Session ended"
    );
    Ok(session)
}

fn execute<W: Write>(
    session: &mut Session,
    config: &Config,
    command: Command,
    out: &mut W,
) -> Result<()> {
    match command {
        Command::Apply(event) => {
            let outcome = session.handle(event)?;
            match outcome.status() {
                Some(status) => writeln!(out, "{}", status)?,
                None => write_form(session, out)?,
            }
        }
        Command::History => write_history(session, out)?,
        Command::Chart(None) => write_chart(session, config, out)?,
        Command::Chart(Some(path)) => {
            let svg = session
                .view()
                .chart
                .render_svg(config.chart.width, config.chart.height)?;
            std::fs::write(&path, svg)?;
            writeln!(out, "Chart written to {}", path.display())?;
        }
        Command::Export(None) => {
            session.history().write_csv(&mut *out)?;
        }
        Command::Export(Some(path)) => {
            let file = std::fs::File::create(&path)?;
            let rows = session.history().write_csv(file)?;
            writeln!(out, "Exported {} entries to {}", rows, path.display())?;
        }
        Command::Categories => writeln!(out, "{}", categories_table())?,
        Command::Show => {
            write_form(session, out)?;
            if let Some(status) = session.view().status {
                writeln!(out, "{}", status)?;
            }
            write_chart(session, config, out)?;
            write_history(session, out)?;
        }
        Command::Help => writeln!(out, "{}", HELP)?,
        Command::Quit | Command::Empty => {}
    }
    Ok(())
}

fn write_form<W: Write>(session: &Session, out: &mut W) -> Result<()> {
    let form = session.form();
    writeln!(
        out,
        "{} | {}: {} | {}: {}",
        form.units().label(),
        form.weight_label(),
        form.weight(),
        form.height_label(),
        form.height()
    )?;
    Ok(())
}

fn write_chart<W: Write>(session: &Session, config: &Config, out: &mut W) -> Result<()> {
    let chart = session.view().chart;
    writeln!(out, "{}", chart.render_text(config.chart.text_width))?;
    writeln!(out, "{}", chart.text_legend())?;
    Ok(())
}

fn write_history<W: Write>(session: &Session, out: &mut W) -> Result<()> {
    let view = session.view();
    match view.history_placeholder() {
        Some(placeholder) => writeln!(out, "{}", placeholder)?,
        None => writeln!(out, "{}", history_table(&view.history))?,
    }
    Ok(())
}
