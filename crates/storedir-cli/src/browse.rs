//! Interactive catalog session over stdin.
//!
//! Each line is one command that becomes an [`InputEvent`]; the session
//! snapshot is updated, the query re-run, and the visible page re-rendered.

use std::io::{self, BufRead, Write};

use storedir_core::{
    query_with_page_size, AppConfig, CatalogSession, InputEvent, InputSource, LoadingState,
    SortMode, Store,
};

use crate::catalog::load_catalog;
use crate::SourceArgs;

const HELP: &str = "\
commands:
  q <text>          search (empty text clears)
  region <name>     exact region filter (empty clears)
  muni <name>       municipality filter (empty clears)
  sort <mode>       featured-first | alphabetical | by-region
  address on|off    search address fields
  flexible on|off   substring matching
  brand <name>      search for a brand
  more              load the next page
  reset             clear all filters
  help              show this text
  quit              leave";

/// Parse one command line.
///
/// Returns `Ok(None)` for lines that do not change state (blank, `help`).
pub(crate) fn parse_event(line: &str) -> Result<Option<InputEvent>, String> {
    let line = line.trim();
    let (command, arg) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(c, a)| (c, a.trim()));

    let event = match command {
        "" | "help" => return Ok(None),
        "q" | "query" => InputEvent::Query(arg.to_owned()),
        "region" => InputEvent::Region(arg.to_owned()),
        "muni" | "municipality" => InputEvent::Municipality(arg.to_owned()),
        "sort" => InputEvent::Sort(arg.parse::<SortMode>()?),
        "address" => InputEvent::IncludeAddress(parse_toggle(arg)?),
        "flexible" => InputEvent::FlexibleMatch(parse_toggle(arg)?),
        "brand" => InputEvent::Brand(arg.to_owned()),
        "more" => InputEvent::LoadMore,
        "reset" => InputEvent::Reset,
        other => return Err(format!("unknown command '{other}'; type 'help'")),
    };
    Ok(Some(event))
}

fn parse_toggle(arg: &str) -> Result<bool, String> {
    match arg {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        other => Err(format!("expected on or off, got '{other}'")),
    }
}

/// Line-oriented input source. Ends at EOF or `quit`.
pub(crate) struct LineInput<R> {
    reader: R,
}

impl<R: BufRead> LineInput<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> InputSource for LineInput<R> {
    fn next_event(&mut self) -> Option<InputEvent> {
        let mut line = String::new();
        loop {
            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "failed to read input");
                    return None;
                }
            }
            if matches!(line.trim(), "quit" | "exit") {
                return None;
            }
            match parse_event(&line) {
                Ok(Some(event)) => return Some(event),
                Ok(None) => eprintln!("{HELP}"),
                Err(message) => eprintln!("{message}"),
            }
        }
    }
}

fn render<W: Write>(
    out: &mut W,
    stores: &[Store],
    session: &CatalogSession,
    page_size: usize,
) -> io::Result<CatalogSession> {
    let ticket = session.ticket();
    let page = query_with_page_size(stores, &session.filter, session.page, page_size);
    let next = session
        .apply_result(ticket, page.has_more)
        .unwrap_or_else(|| session.clone());

    if page.visible.is_empty() {
        writeln!(out, "No stores match the current filters.")?;
    }
    for store in &page.visible {
        writeln!(
            out,
            "{} {} | {}",
            if store.is_featured { "*" } else { " " },
            store.display_name(),
            store.location_text()
        )?;
    }
    writeln!(
        out,
        "-- {} of {} (sort: {}){}",
        page.visible.len(),
        page.total,
        next.filter.sort,
        if next.has_more { ", 'more' for next page" } else { "" }
    )?;
    Ok(next)
}

/// Apply events from `input` until it ends, rendering after each one.
pub(crate) fn drive<S: InputSource, W: Write>(
    stores: &[Store],
    page_size: usize,
    mut session: CatalogSession,
    input: &mut S,
    out: &mut W,
) -> io::Result<CatalogSession> {
    session = render(out, stores, &session, page_size)?;
    while let Some(event) = input.next_event() {
        tracing::debug!(?event, "input event");
        session = session.apply_input(event);
        session = render(out, stores, &session, page_size)?;
    }
    Ok(session)
}

pub(crate) async fn run_browse(config: &AppConfig, args: &SourceArgs) -> anyhow::Result<()> {
    let stores = load_catalog(config, args).await?;
    let session = CatalogSession::new().with_loading(LoadingState::finished());
    eprintln!("{} stores loaded; type 'help' for commands", stores.len());

    let stdin = io::stdin();
    let mut input = LineInput::new(stdin.lock());
    let mut out = io::stdout().lock();
    drive(&stores, config.page_size, session, &mut input, &mut out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(name: &str, featured: bool) -> Store {
        Store {
            legal_name: name.to_string(),
            municipality: "MERIDA".to_string(),
            region: "YUCATAN".to_string(),
            is_featured: featured,
            ..Store::default()
        }
    }

    #[test]
    fn parses_commands() {
        assert_eq!(
            parse_event("q  farmacia ").unwrap(),
            Some(InputEvent::Query("farmacia".to_string()))
        );
        assert_eq!(
            parse_event("sort az").unwrap(),
            Some(InputEvent::Sort(SortMode::Alphabetical))
        );
        assert_eq!(
            parse_event("flexible on").unwrap(),
            Some(InputEvent::FlexibleMatch(true))
        );
        assert_eq!(parse_event("region").unwrap(), Some(InputEvent::Region(String::new())));
        assert_eq!(parse_event("more").unwrap(), Some(InputEvent::LoadMore));
        assert_eq!(parse_event("   ").unwrap(), None);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_event("sort sideways").is_err());
        assert!(parse_event("address maybe").is_err());
        assert!(parse_event("dance").is_err());
    }

    #[test]
    fn line_input_stops_at_quit_and_skips_invalid_lines() {
        let text = "q oxxo\nbogus\n\nmore\nquit\nreset\n";
        let mut input = LineInput::new(text.as_bytes());
        assert_eq!(input.next_event(), Some(InputEvent::Query("oxxo".to_string())));
        assert_eq!(input.next_event(), Some(InputEvent::LoadMore));
        assert_eq!(input.next_event(), None);
    }

    #[test]
    fn drive_pages_through_results() {
        let stores: Vec<Store> = (0..5).map(|i| store(&format!("TIENDA {i}"), i == 3)).collect();
        let mut input = LineInput::new("more\nmore\nmore\n".as_bytes());
        let mut out = Vec::new();

        let session = drive(&stores, 2, CatalogSession::new(), &mut input, &mut out).unwrap();

        assert_eq!(session.page, 2);
        assert!(!session.has_more);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("* TIENDA 3 | MERIDA, YUCATAN\n"));
        assert!(text.contains("-- 5 of 5 (sort: featured-first)\n"));
    }

    #[test]
    fn drive_resets_page_on_new_query() {
        let stores: Vec<Store> = (0..5).map(|i| store(&format!("TIENDA {i}"), false)).collect();
        let mut input = LineInput::new("more\nq tienda 4\n".as_bytes());
        let mut out = Vec::new();

        let session = drive(&stores, 2, CatalogSession::new(), &mut input, &mut out).unwrap();

        assert_eq!(session.page, 0);
        assert_eq!(session.filter.query, "tienda 4");
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("-- 1 of 1 (sort: featured-first)\n"));
    }
}
