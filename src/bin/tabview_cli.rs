//! CLI tool for tabview - renders service responses as text
//!
//! The source is either a saved JSON response or the base URL of a live
//! calculation service.
//!
//! Usage:
//!   tabview_cli table <capacity.json|URL> [--filter Q] [--sort COL]... [--page N] [--csv DIR]
//!   tabview_cli sheet <sheet.json|URL> [--name SHEET] [--max-rows N]
//!   tabview_cli refs <formula>...

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;

use tabview::config::{ServiceConfig, ViewConfig};
use tabview::export::DirectorySink;
use tabview::references::{extract_references, InputForm};
use tabview::remote::{decode_response, decode_sheet, CapacityRequest, CapacityResponse, HttpService};
use tabview::render::{GridView, SectionsView};
use tabview::session::{CapacitySession, LoadOutcome, SheetSession};
use tabview::table::SortColumn;

const USAGE: &str = "Usage:
  tabview_cli table <capacity.json|URL> [--filter Q] [--sort COL]... [--page N] [--csv DIR]
  tabview_cli sheet <sheet.json|URL> [--name SHEET] [--max-rows N]
  tabview_cli refs <formula>...";

fn fail(msg: &str) -> ! {
    eprintln!("{msg}");
    std::process::exit(1);
}

fn read(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| fail(&format!("Error reading {path}: {e}")))
}

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

fn service(base_url: &str) -> HttpService {
    let config = ServiceConfig {
        base_url: base_url.trim_end_matches('/').to_string(),
        ..ServiceConfig::default()
    };
    HttpService::new(config).unwrap_or_else(|e| fail(&format!("Error creating client: {e}")))
}

fn check(outcome: LoadOutcome) {
    if let LoadOutcome::Failed(message) = outcome {
        fail(&message);
    }
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("table") if args.len() >= 2 => table(&args[1], &args[2..]),
        Some("sheet") if args.len() >= 2 => sheet(&args[1], &args[2..]),
        Some("refs") => refs(&args[1..]),
        _ => fail(USAGE),
    }
}

fn table(source: &str, opts: &[String]) {
    let mut session = CapacitySession::new(ViewConfig::default());
    if is_url(source) {
        check(session.load_with(&service(source), &CapacityRequest::default()));
    } else {
        let body = read(source);
        let ticket = session.begin_load();
        check(session.finish_load(ticket, decode_response::<CapacityResponse>(200, &body)));
    }

    let mut csv_dir = None;
    let mut i = 0;
    while i < opts.len() {
        let value = opts.get(i + 1).map(String::as_str);
        match (opts[i].as_str(), value) {
            ("--filter", Some(q)) => session.table_mut().set_filter(q),
            ("--sort", Some(col)) => {
                let col = SortColumn::parse(col).unwrap_or_else(|| fail(&format!("Unknown column: {col}")));
                session.table_mut().toggle_sort(col);
            }
            ("--page", Some(n)) => {
                let n: i64 = n.parse().unwrap_or_else(|_| fail(&format!("Bad page: {n}")));
                session.table_mut().set_page(n - 1);
            }
            ("--csv", Some(dir)) => csv_dir = Some(dir.to_string()),
            (other, _) => fail(&format!("Unknown option: {other}\n{USAGE}")),
        }
        i += 2;
    }

    if let Some(summary) = session.summary() {
        println!("{}", summary.formula);
        println!("Total Capacity (Geometric): {}", summary.geometric_capacity);
        println!("Working Capacity (90%): {}", summary.working_capacity);
        println!();
    }

    let page = session.table().current_page();
    println!("{}", page.total_label);
    println!("{:>12} {:>16} {:>8} {:>18}", page.headers[0], page.headers[1], page.headers[2], page.headers[3]);
    for row in &page.rows {
        let [a, b, c, d] = row.cells();
        println!("{a:>12} {b:>16} {c:>8} {d:>18}");
    }
    println!("{}", page.page.label);

    if let Some(dir) = csv_dir {
        let mut sink = DirectorySink::new(dir);
        if let Err(e) = session.export_to(&mut sink) {
            fail(&format!("Export failed: {e}"));
        }
    }
}

fn sheet(source: &str, opts: &[String]) {
    let mut config = ViewConfig::default();
    let mut name = None;
    for pair in opts.chunks(2) {
        match pair {
            [flag, n] if flag == "--max-rows" => {
                config.grid_max_rows = n.parse().unwrap_or_else(|_| fail(&format!("Bad row count: {n}")));
            }
            [flag, sheet] if flag == "--name" => name = Some(sheet.clone()),
            _ => fail(USAGE),
        }
    }

    let mut session = SheetSession::new(config);
    if is_url(source) {
        let service = service(source);
        check(session.list_sheets_with(&service));
        println!("Sheets: {}", session.sheets().join(", "));
        let name = name
            .or_else(|| session.sheets().first().cloned())
            .unwrap_or_else(|| fail("Workbook has no sheets"));
        check(session.load_sheet_with(&service, &name));
    } else {
        let body = read(source);
        let name = name.unwrap_or_else(|| {
            std::path::Path::new(source)
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        });
        let ticket = session.begin_sheet();
        check(session.finish_sheet(ticket, decode_sheet(&name, 200, &body)));
    }

    if let Some(info) = session.info() {
        println!(
            "Sheet: {}  Rows: {}  Columns: {}  Formulas: {}  Sections: {}",
            info.name, info.rows, info.cols, info.formulas, info.sections
        );
    }

    match session.grid() {
        GridView::NoData { message } => println!("{message}"),
        GridView::Table(grid) => {
            println!("{}", grid.header.join("\t"));
            for row in &grid.rows {
                let cells: Vec<String> = row
                    .cells
                    .iter()
                    .map(|c| if c.is_formula { format!("{}*", c.text) } else { c.text.clone() })
                    .collect();
                println!("{}\t{}", row.number, cells.join("\t"));
            }
            if let Some(note) = grid.note {
                println!("{note}");
            }
        }
    }

    if let SectionsView::Sections(sections) = session.sections() {
        for section in sections {
            println!("[{}]", section.name);
            for cell in &section.cells {
                println!("  {}: {}", cell.label, cell.value);
            }
            if let Some(more) = section.more {
                println!("  {more}");
            }
        }
    }

    match session.input_form() {
        InputForm::Fields(fields) => {
            let refs: Vec<&str> = fields.iter().map(|f| f.reference.as_str()).collect();
            println!("Inputs: {}", refs.join(", "));
        }
        InputForm::NoInputs { message } => println!("{message}"),
    }
}

fn refs(formulas: &[String]) {
    if formulas.is_empty() {
        fail(USAGE);
    }
    for formula in formulas {
        println!("{formula}: {}", extract_references(formula).join(", "));
    }
}
