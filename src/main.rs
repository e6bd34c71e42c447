use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tocsmith::{TocConfig, TocError, import_outline, load_document, read_outline_file, synthesize_toc};

/// Adds a linked table of contents to a PDF.
#[derive(Debug, Parser)]
#[command(name = "tocsmith", version)]
struct Args {
    /// PDF to add the table of contents to
    input: PathBuf,

    /// Where to write the result
    #[arg(short, long)]
    output: PathBuf,

    /// Outline JSON: a tree of {title, to, children} or flat {title, level, page} rows
    #[arg(long, conflicts_with = "import_outline")]
    outline: Option<PathBuf>,

    /// Use the input's existing bookmarks as the outline
    #[arg(long)]
    import_outline: bool,

    /// Configuration JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Insert the ToC before this 1-based page
    #[arg(long)]
    insert_at: Option<i64>,

    /// Shift every link target by this many pages
    #[arg(long, allow_hyphen_values = true)]
    offset: Option<i64>,

    /// Heading above the entries
    #[arg(long)]
    title: Option<String>,

    /// Leave entry titles unnumbered
    #[arg(long)]
    no_numbering: bool,

    /// Also write the outline as PDF bookmarks
    #[arg(long)]
    bookmarks: bool,

    /// TrueType font for regular text
    #[arg(long)]
    font_regular: Option<PathBuf>,

    /// TrueType font for bold text
    #[arg(long)]
    font_bold: Option<PathBuf>,
}

impl Args {
    fn config(&self) -> Result<TocConfig, TocError> {
        let mut config = match &self.config {
            Some(path) => TocConfig::from_file(path)?,
            None => TocConfig::default(),
        };
        if let Some(page) = self.insert_at {
            config.insertion_page = page;
        }
        if let Some(offset) = self.offset {
            config.page_offset = offset;
        }
        if let Some(title) = &self.title {
            config.title = title.clone();
        }
        if self.no_numbering {
            config.numbering = false;
        }
        if self.bookmarks {
            config.write_bookmarks = true;
        }
        if let Some(path) = &self.font_regular {
            config.fonts.regular = Some(path.clone());
        }
        if let Some(path) = &self.font_bold {
            config.fonts.bold = Some(path.clone());
        }
        Ok(config)
    }
}

fn run(args: &Args) -> Result<usize, TocError> {
    let config = args.config()?;
    // Fonts and the source are loaded before any layout work starts.
    let fonts = config.fonts.load()?;
    let source = load_document(&args.input)?;

    let outline = match &args.outline {
        Some(path) => read_outline_file(path)?,
        None if args.import_outline => import_outline(&source)?,
        None => {
            log::warn!("No outline given, importing bookmarks from {}", args.input.display());
            import_outline(&source)?
        }
    };
    if outline.is_empty() {
        log::warn!("Outline is empty, the ToC will only carry its heading");
    }

    let mut result = synthesize_toc(&source, &outline, &config, &fonts)?;
    result.save(&args.output)?;
    Ok(result.toc_page_count)
}

fn main() -> ExitCode {
    if std::env::var("RUST_LOG").is_err() {
        unsafe { std::env::set_var("RUST_LOG", "tocsmith=info") };
    }
    env_logger::init();

    let args = Args::parse();
    match run(&args) {
        Ok(pages) => {
            println!("Added {} ToC page(s) -> {}", pages, args.output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
