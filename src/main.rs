use board_cut::export;
use board_cut::render;
use board_cut::{BoardSearch, OptimizationResult, PieceDemand, Settings, Size};
use clap::{Parser, ValueEnum};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "board_cut",
    about = "Guillotine cut planner for rectangular parts on stock boards"
)]
struct Cli {
    /// Stock board dimensions in mm (WxH, e.g. 2440x1220)
    #[arg(long, default_value = "2440x1220")]
    board: String,

    /// Pieces as WxH:qty or WxH:qty:id (e.g. 300x500:5 400x400:8:shelf)
    #[arg(long = "pieces", num_args = 1.., required = true)]
    pieces: Vec<String>,

    /// Blade kerf width in mm
    #[arg(long, default_value_t = Settings::DEFAULT_KERF)]
    kerf: f64,

    /// Disable piece rotation
    #[arg(long)]
    no_rotate: bool,

    /// Only search the first board that fits each piece
    #[arg(long)]
    first_fit: bool,

    /// Show ASCII layout of each board (text format only)
    #[arg(long)]
    layout: bool,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Log placement decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Csv,
    Json,
}

fn build_settings(cli: &Cli) -> board_cut::Result<Settings> {
    let board: Size = cli.board.parse()?;
    let settings = Settings {
        board_width: board.w,
        board_height: board.h,
        kerf: cli.kerf,
        allow_rotation: !cli.no_rotate,
        search: if cli.first_fit {
            BoardSearch::FirstFit
        } else {
            BoardSearch::Global
        },
    };
    settings.validate()?;
    Ok(settings)
}

fn build_demands(cli: &Cli) -> board_cut::Result<Vec<PieceDemand>> {
    cli.pieces
        .iter()
        .enumerate()
        .map(|(i, s)| PieceDemand::parse(s, &(i + 1).to_string()))
        .collect()
}

fn print_text(result: &OptimizationResult, layout: bool) {
    for board in &result.boards {
        println!(
            "Board {} ({:.1}% used, {:.1}% waste):",
            board.id, board.efficiency, board.waste
        );
        for p in &board.placed_pieces {
            let rot = if p.rotated { " [rotated]" } else { "" };
            println!(
                "  {} {}x{} @ ({}, {}){}",
                p.instance_id, p.rect.w, p.rect.h, p.rect.x, p.rect.y, rot
            );
        }
        if layout {
            print!("{}", render::render_board(board));
        }
        println!();
    }

    for d in &result.unplaced_pieces {
        println!("Unplaced: {} {}x{}", d.id, d.width, d.height);
    }

    println!(
        "Summary: {} board{} used, {:.1}% efficiency, {:.1}% waste",
        result.total_boards,
        if result.total_boards == 1 { "" } else { "s" },
        result.total_efficiency,
        result.total_waste,
    );
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_max_level(Level::TRACE)
            .init();
    }

    let settings = build_settings(&cli).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let demands = build_demands(&cli).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let result = board_cut::optimize(&demands, &settings);

    match cli.format {
        Format::Text => print_text(&result, cli.layout),
        Format::Csv => print!("{}", export::to_csv(&result)),
        Format::Json => match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
    }

    if !result.unplaced_pieces.is_empty() {
        std::process::exit(2);
    }
}
