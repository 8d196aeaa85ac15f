//! Example: convert a workbook and print the HTML
//!
//! ```text
//! cargo run -p sheet2html --example convert -- report.xlsx
//! ```

use sheet2html::prelude::*;

fn main() -> Result<()> {
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: convert <workbook.xlsx>");
        std::process::exit(1);
    };

    let workbook = Workbook::open(&path)?;
    for sheet in workbook.worksheets() {
        eprintln!(
            "{}: {} cells, {} merged regions",
            sheet.name(),
            sheet.cell_count(),
            sheet.merged_regions().len()
        );
    }

    let converter = Converter::new(HtmlOptions::default());
    let html = converter.convert_workbook(&workbook, Some(&default_title(&path)));
    print!("{}", html);
    Ok(())
}
