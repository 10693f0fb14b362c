//! Listing commands: projects, map tokens, scenes and datasources

use clap::Args;

use rfclient::api::QueryParams;
use rfclient::session::SceneQuery;

use super::{parse_key_val, print_json, Context, OutputFormat};

/// Arguments for the scenes command
#[derive(Args, Debug)]
pub struct ScenesArgs {
    /// Bounding box as min_x,min_y,max_x,max_y
    #[arg(long)]
    pub bbox: Option<String>,

    /// Extra filter passed through as a query parameter (repeatable)
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,
}

/// Arguments for the datasources command
#[derive(Args, Debug)]
pub struct DatasourcesArgs {
    /// Filter passed through as a query parameter (repeatable)
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,
}

pub async fn projects(ctx: &Context) -> anyhow::Result<()> {
    let session = ctx.connect().await?;
    let projects = session.projects().await?;

    match ctx.format {
        OutputFormat::Json => {
            let records: Vec<_> = projects.iter().map(|p| p.record()).collect();
            print_json(&records)?;
        }
        OutputFormat::Text => {
            for project in &projects {
                println!("{}  {}", project.id(), project.name());
            }
            println!("{} project(s)", projects.len());
        }
    }
    Ok(())
}

pub async fn map_tokens(ctx: &Context) -> anyhow::Result<()> {
    let session = ctx.connect().await?;
    let tokens = session.map_tokens().await?;

    match ctx.format {
        OutputFormat::Json => {
            let records: Vec<_> = tokens.iter().map(|t| t.record()).collect();
            print_json(&records)?;
        }
        OutputFormat::Text => {
            for token in &tokens {
                println!(
                    "{}  {}  project={}",
                    token.id(),
                    token.name().unwrap_or("-"),
                    token.project_id().unwrap_or("-")
                );
            }
            println!("{} map token(s)", tokens.len());
        }
    }
    Ok(())
}

pub async fn scenes(ctx: &Context, args: ScenesArgs) -> anyhow::Result<()> {
    let mut query = SceneQuery {
        bbox: None,
        params: args.params.into_iter().collect(),
    };
    if let Some(bbox) = args.bbox {
        query = query.with_bbox(bbox);
    }

    let session = ctx.connect().await?;
    print_json(&session.scenes(&query).await?)
}

pub async fn datasources(ctx: &Context, args: DatasourcesArgs) -> anyhow::Result<()> {
    let params: QueryParams = args.params.into_iter().collect();
    let session = ctx.connect().await?;
    print_json(&session.datasources(&params).await?)
}
