// barcode-sheets: generate print-ready A4 sheets of barcodes

use clap::{ArgGroup, Parser};

use barcode_sheets::{
    generate_sheets, save_pdf, save_png, BarcodeSpec, Progress, RenderOptions, Result,
    SheetError, SheetOptions,
};

/// CLI Arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Generate print-ready A4 sheets of barcodes")]
#[command(group(ArgGroup::new("input").required(true).args(["specs", "number"])))]
struct Args {
    /// Spec file (JSON array of {"number", "count", "title"?} objects)
    #[arg(short, long)]
    specs: Option<String>,

    /// Single barcode number (legacy single-payload mode)
    #[arg(short, long)]
    number: Option<String>,

    /// Number of copies in --number mode
    #[arg(short, long, default_value = "65")]
    count: u32,

    /// Title printed above each barcode in --number mode
    #[arg(short, long)]
    title: Option<String>,

    /// Output filename (defaults to multi_barcodes_{types}_types_{total}_total.pdf)
    #[arg(short, long)]
    output: Option<String>,

    /// Also write each sheet as sheet-{n}.png next to the PDF
    #[arg(long)]
    png: bool,

    /// Suppress per-barcode progress output
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    let specs = if let Some(path) = &args.specs {
        load_specs(path)?
    } else {
        // Presence guaranteed by the input arg group.
        let number = args.number.clone().unwrap_or_default();
        vec![match &args.title {
            Some(title) => BarcodeSpec::with_title(number, args.count, title),
            None => BarcodeSpec::new(number, args.count),
        }]
    };

    let total: u64 = specs.iter().map(|s| s.count as u64).sum();
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| format!("multi_barcodes_{}_types_{}_total.pdf", specs.len(), total));

    let sheet_opts = SheetOptions::default();
    let render_opts = RenderOptions::default();

    let quiet = args.quiet;
    let sheets = generate_sheets(&specs, &sheet_opts, &render_opts, |event| {
        if quiet {
            return;
        }
        match event {
            Progress::GridComputed {
                columns,
                rows,
                per_sheet,
                unit_width,
                unit_height,
            } => {
                println!("Grid layout: {}x{} = {} barcodes per sheet", columns, rows, per_sheet);
                println!("Barcode size: {}x{} pixels", unit_width, unit_height);
            }
            Progress::BarcodeRendered {
                index,
                total,
                number,
                sheet,
            } => {
                println!("Generated barcode {}/{}: {} (Sheet {})", index, total, number, sheet);
            }
            Progress::SheetStarted { .. }
            | Progress::SheetCompleted { .. }
            | Progress::BatchFinished { .. } => {}
        }
    })?;

    save_pdf(&sheets, output.as_ref(), sheet_opts.dpi)?;

    if args.png {
        for (i, sheet) in sheets.iter().enumerate() {
            let png_name = format!("sheet-{}.png", i + 1);
            save_png(sheet, png_name.as_ref())?;
            if !quiet {
                println!("  Saved: {}", png_name);
            }
        }
    }

    println!("✓ Generated: {}", output);
    println!("  Sheets: {}", sheets.len());
    println!("  Barcodes: {}", total);

    Ok(())
}

fn load_specs(path: &str) -> Result<Vec<BarcodeSpec>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| SheetError::SpecFile(format!("{}: {}", path, e)))?;
    serde_json::from_str(&content).map_err(|e| SheetError::SpecFile(format!("Invalid JSON: {}", e)))
}
