use anyhow::{anyhow, bail};
use clap::{command, Arg, ArgMatches, Command};
use generator::{data::Manifest, generate};
use state::State;
use std::{io::Write, path::PathBuf};

mod cascade;
mod generator;
mod manifest;
mod permalink;
mod state;

fn cli() -> Command {
    command!().args([
        Arg::new("article_dir")
            .help("Directory path of articles")
            .value_parser(clap::value_parser!(PathBuf))
            .default_value("posts"),
        Arg::new("out_dir")
            .help("Directory path of output. Only used to compute output paths.")
            .value_parser(clap::value_parser!(PathBuf))
            .default_value("out"),
        Arg::new("blog_dir")
            .long("blog-dir")
            .help("Directory under article_dir whose files get /blog/<slug>/ permalinks")
            .value_parser(clap::value_parser!(PathBuf))
            .default_value("."),
        Arg::new("manifest")
            .long("manifest")
            .help("Write the permalink manifest here instead of stdout")
            .value_parser(clap::value_parser!(PathBuf)),
    ])
}

fn state_from_matches(matches: &ArgMatches) -> anyhow::Result<State> {
    let article_dir: &PathBuf = matches
        .get_one::<PathBuf>("article_dir")
        .ok_or_else(|| anyhow!("article_dir is required"))?;
    if !article_dir.exists() || !article_dir.is_dir() {
        bail!("article_dir must be a directory.");
    }
    let out_dir: &PathBuf = matches
        .get_one::<PathBuf>("out_dir")
        .ok_or_else(|| anyhow!("out_dir is required"))?;
    if out_dir.exists() && !out_dir.is_dir() {
        bail!("if out_dir exists, it must be directory.");
    }
    let blog_dir: &PathBuf = matches
        .get_one::<PathBuf>("blog_dir")
        .ok_or_else(|| anyhow!("blog_dir is required"))?;
    if blog_dir.is_absolute() {
        bail!("blog_dir must be relative to article_dir.");
    }
    if !article_dir.join(blog_dir).is_dir() {
        bail!("blog_dir must be a directory under article_dir.");
    }

    Ok(State {
        article_dir: article_dir.to_owned(),
        out_dir: out_dir.to_owned(),
        blog_dir: blog_dir.to_owned(),
    })
}

fn emit_manifest<W: Write>(
    matches: &ArgMatches,
    stdout: W,
    manifest: &Manifest,
) -> anyhow::Result<()> {
    match matches.get_one::<PathBuf>("manifest") {
        Some(path) => manifest::save_manifest(path, manifest),
        None => manifest::write_manifest(stdout, manifest),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let matches = cli().get_matches();

    state::STATE
        .set(state_from_matches(&matches)?)
        .map_err(|_| anyhow!("state is already initialized"))?;

    let manifest = generate()?;
    emit_manifest(&matches, std::io::stdout().lock(), &manifest)?;

    Ok(())
}
