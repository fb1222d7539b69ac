use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use editor_config::{
    AssetNamespace, ConfigNode, ConfigResolver, DirectoryNamespace, KeyPath, Mapping,
    PrefixNamespace, ResolverConfig,
};

#[derive(Parser, Debug)]
#[command(name = "editor-config", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve every asset reference in a configuration document.
    Resolve(ResolveArgs),
    /// Print the value at a dotted key path.
    Get(GetArgs),
    /// List the asset families that would be resolved.
    Families(FamiliesArgs),
}

#[derive(Parser, Debug)]
struct ResolveArgs {
    /// Input configuration JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output path. Defaults to stdout.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Resolve bare asset names against files in this bundle directory.
    #[arg(long, conflicts_with = "prefix")]
    bundle_dir: Option<PathBuf>,

    /// Resolve bare asset names by prepending this URI prefix.
    #[arg(long)]
    prefix: Option<String>,

    /// Resolver configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Indent the output.
    #[arg(long)]
    pretty: bool,
}

#[derive(Parser, Debug)]
struct GetArgs {
    /// Input configuration JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Dotted key path, e.g. `export.image.exportType`.
    #[arg(long)]
    path: String,
}

#[derive(Parser, Debug)]
struct FamiliesArgs {
    /// Resolver configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Resolve(args) => cmd_resolve(args),
        Command::Get(args) => cmd_get(args),
        Command::Families(args) => cmd_families(args),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_config(path: Option<&Path>) -> anyhow::Result<ResolverConfig> {
    match path {
        Some(p) => Ok(ResolverConfig::from_path(p)?),
        None => Ok(ResolverConfig::default()),
    }
}

fn read_document(path: &Path) -> anyhow::Result<Mapping> {
    let f = File::open(path).with_context(|| format!("open configuration '{}'", path.display()))?;
    let root = editor_config::decode_reader(BufReader::new(f))
        .with_context(|| format!("decode configuration '{}'", path.display()))?;
    Ok(root)
}

enum CliNamespace {
    Directory(DirectoryNamespace),
    Prefix(PrefixNamespace),
}

impl AssetNamespace for CliNamespace {
    fn lookup(&self, name: &str) -> Option<String> {
        match self {
            Self::Directory(ns) => ns.lookup(name),
            Self::Prefix(ns) => ns.lookup(name),
        }
    }
}

fn make_namespace(args: &ResolveArgs) -> anyhow::Result<CliNamespace> {
    if let Some(dir) = &args.bundle_dir {
        return Ok(CliNamespace::Directory(DirectoryNamespace::new(dir)?));
    }
    if let Some(prefix) = &args.prefix {
        return Ok(CliNamespace::Prefix(PrefixNamespace::new(prefix.clone())));
    }
    let doc_dir = args.in_path.parent().unwrap_or_else(|| Path::new("."));
    let doc_dir = if doc_dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        doc_dir
    };
    Ok(CliNamespace::Directory(DirectoryNamespace::new(doc_dir)?))
}

fn cmd_resolve(args: ResolveArgs) -> anyhow::Result<()> {
    let config = read_config(args.config.as_deref())?;
    let namespace = make_namespace(&args)?;
    let resolver = ConfigResolver::from_config(namespace, &config)?;

    let mut root = read_document(&args.in_path)?;
    let stats = resolver.resolve(&mut root);

    let node = ConfigNode::Mapping(root);
    let text = if args.pretty {
        editor_config::encode_pretty(&node)?
    } else {
        editor_config::encode(&node)?
    };

    match &args.out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(out, text)
                .with_context(|| format!("write resolved configuration '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{text}"),
    }

    eprintln!(
        "families: {}, resolved: {}, unchanged: {}, cleared: {}",
        stats.families_visited, stats.fields_resolved, stats.fields_unchanged, stats.fields_cleared
    );
    Ok(())
}

fn cmd_get(args: GetArgs) -> anyhow::Result<()> {
    let root = read_document(&args.in_path)?;
    let path = KeyPath::parse(&args.path)?;
    let node = editor_config::key_path::get(&root, &path)
        .with_context(|| format!("no value at '{path}'"))?;
    println!("{}", editor_config::encode_pretty(node)?);
    Ok(())
}

fn cmd_families(args: FamiliesArgs) -> anyhow::Result<()> {
    let config = read_config(args.config.as_deref())?;
    let catalog = config.catalog()?;
    for rule in catalog.rules() {
        let fields: Vec<String> = rule.category_fields.iter().map(ToString::to_string).collect();
        print!("{:<12} {} [{}]", rule.family, rule.category_path, fields.join(", "));
        if let Some((items, item_fields)) = rule.items() {
            let item_fields: Vec<String> = item_fields.iter().map(ToString::to_string).collect();
            print!(" -> {} [{}]", items, item_fields.join(", "));
        }
        println!();
    }
    Ok(())
}
