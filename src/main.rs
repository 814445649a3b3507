use anyhow::Result;
use clap::{Parser, Subcommand};
use ruck::areas::repository::Repository;
use ruck::artifacts::objects::object_type::ObjectType;

#[derive(Parser)]
#[command(
    name = "ruck",
    version = "0.1.0",
    about = "A minimal content-addressable object store and status engine",
    long_about = "ruck stores arbitrary content under deterministic SHA-1 addresses, \
    tracks file states in a git-compatible binary index, \
    and reports how the working tree has drifted from that index.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(
        name = "cat-file",
        about = "Print the content of an object",
        long_about = "This command resolves an address prefix and prints the object's payload \
        (mode blob/tree/commit/pretty), its kind (mode type), or its payload size (mode size)."
    )]
    CatFile {
        #[arg(index = 1, help = "One of: blob, tree, commit, type, size, pretty")]
        mode: String,
        #[arg(index = 2, help = "An address prefix of at least 2 characters")]
        prefix: String,
    },
    #[command(
        name = "hash-object",
        about = "Hash a file and optionally write it to the object database",
        long_about = "This command hashes a file as an object of the given kind and prints the \
        resulting address. With --write, the compressed object is stored."
    )]
    HashObject {
        #[arg(short, long, required = false, help = "Write the object to the object database")]
        write: bool,
        #[arg(short = 't', long, default_value = "blob", help = "The object kind")]
        kind: String,
        #[arg(index = 1)]
        file: String,
    },
    #[command(
        name = "add",
        about = "Stage files in the index",
        long_about = "This command stores the content of the given files as blobs and records \
        their state in the index. Directories are expanded recursively."
    )]
    Add {
        #[arg(required = true, help = "Files or directories to stage")]
        paths: Vec<String>,
    },
    #[command(
        name = "ls-files",
        about = "List paths tracked by the index",
        long_about = "This command lists every index entry path. With --stage, each line also \
        shows the entry's mode, address, and merge stage."
    )]
    LsFiles {
        #[arg(short, long, help = "Show mode, address, and stage for each entry")]
        stage: bool,
    },
    #[command(
        name = "status",
        about = "Show changed, untracked, and deleted files",
        long_about = "This command compares the working tree against the index and reports \
        tracked files with drifted content, untracked files, and deleted files."
    )]
    Status,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Init { path } => {
            let mut repository = match path {
                Some(path) => Repository::new(path, Box::new(std::io::stdout()))?,
                None => repository_at_cwd()?,
            };

            repository.init()?
        }
        Commands::CatFile { mode, prefix } => repository_at_cwd()?.cat_file(mode, prefix)?,
        Commands::HashObject { write, kind, file } => {
            let kind = kind.parse::<ObjectType>()?;
            repository_at_cwd()?.hash_object(file, kind, *write)?
        }
        Commands::Add { paths } => repository_at_cwd()?.add(paths)?,
        Commands::LsFiles { stage } => repository_at_cwd()?.ls_files(*stage)?,
        Commands::Status => repository_at_cwd()?.status()?,
    }

    Ok(())
}

fn repository_at_cwd() -> Result<Repository> {
    let pwd = std::env::current_dir()?;
    Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))
}
