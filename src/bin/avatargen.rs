use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

const DEFAULT_BATCH_USERS: [&str; 4] = [
    "testuser",
    "chrsintyre",
    "username",
    "underscore_________",
];

#[derive(Parser, Debug)]
#[command(name = "avatargen", version)]
struct Cli {
    /// Log debug events (seeds, expressions) to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one avatar as a PNG.
    Render(RenderArgs),
    /// Render `<user>.png` for each user into a directory.
    Batch(BatchArgs),
    /// Print seeds and channel expressions as JSON.
    Describe(DescribeArgs),
}

#[derive(Args, Debug)]
struct OptsArgs {
    /// Options JSON (half_size, policy, parallel, threads).
    #[arg(long)]
    opts: Option<PathBuf>,

    /// Override pixels per unit (image side is twice this).
    #[arg(long)]
    half_size: Option<u32>,

    /// Rasterize on a rayon pool.
    #[arg(long)]
    parallel: bool,

    /// Worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Identifier to render.
    #[arg(long)]
    user: String,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    opts: OptsArgs,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,

    #[command(flatten)]
    opts: OptsArgs,

    /// Identifiers to render (defaults to a small sample set).
    users: Vec<String>,
}

#[derive(Parser, Debug)]
struct DescribeArgs {
    /// Identifier to describe.
    #[arg(long)]
    user: String,
}

#[derive(serde::Serialize)]
struct Description<'a> {
    user: &'a str,
    seeds: avatargen::Seeds,
    red: String,
    green: String,
    blue: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Batch(args) => cmd_batch(args),
        Command::Describe(args) => cmd_describe(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_opts(args: &OptsArgs) -> anyhow::Result<avatargen::AvatarOpts> {
    let mut opts = match &args.opts {
        Some(path) => avatargen::AvatarOpts::from_path(path)?,
        None => avatargen::AvatarOpts::default(),
    };
    if let Some(h) = args.half_size {
        opts.half_size = h;
    }
    if args.parallel {
        opts.parallel = true;
    }
    if args.threads.is_some() {
        opts.threads = args.threads;
    }
    opts.validate()?;
    Ok(opts)
}

fn write_png(user: &str, out: &Path, opts: &avatargen::AvatarOpts) -> anyhow::Result<()> {
    let avatar = avatargen::render_avatar(user, opts)
        .with_context(|| format!("render avatar for '{user}'"))?;

    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    avatar
        .image
        .save_with_format(out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", out.display()))?;

    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let opts = resolve_opts(&args.opts)?;
    write_png(&args.user, &args.out, &opts)
}

fn cmd_batch(args: BatchArgs) -> anyhow::Result<()> {
    let opts = resolve_opts(&args.opts)?;
    let users: Vec<String> = if args.users.is_empty() {
        DEFAULT_BATCH_USERS.iter().map(|u| u.to_string()).collect()
    } else {
        args.users
    };

    for user in &users {
        let out = args.out_dir.join(format!("{user}.png"));
        write_png(user, &out, &opts)?;
    }
    Ok(())
}

fn cmd_describe(args: DescribeArgs) -> anyhow::Result<()> {
    let seeds = avatargen::derive_seeds(&args.user)?;
    let [red, green, blue] = seeds.channels().map(|s| avatargen::build_expr(s).to_string());
    let desc = Description {
        user: &args.user,
        seeds,
        red,
        green,
        blue,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&desc).context("serialize description")?
    );
    Ok(())
}
