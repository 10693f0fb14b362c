//! Training data commands

use clap::Args;

use rfclient::training::{
    ChannelOrder, DryRunSubmitter, LocalManifestStore, PrepTrainDataOptions, PrepTrainDataRequest,
};
use rfclient::Result;

use super::{print_json, Context, OutputFormat};

/// Arguments for the project-configs command
#[derive(Args, Debug)]
pub struct ProjectConfigsArgs {
    /// Project to include (repeatable, paired in order with --annotation-uri)
    #[arg(long = "project-id", required = true)]
    pub project_ids: Vec<String>,

    /// Annotation URI for the project at the same position
    #[arg(long = "annotation-uri", required = true)]
    pub annotation_uris: Vec<String>,
}

/// Arguments for the prep-train-data command
///
/// Jobs are not sent to a real executor from the CLI: the batch request is
/// printed instead. Library users plug in their own `BatchSubmitter`.
#[derive(Args, Debug)]
pub struct PrepTrainDataArgs {
    /// Project to include (repeatable, paired in order with --annotation-uri)
    #[arg(long = "project-id", required = true)]
    pub project_ids: Vec<String>,

    /// Annotation URI for the project at the same position
    #[arg(long = "annotation-uri", required = true)]
    pub annotation_uris: Vec<String>,

    /// URI of the output zip file
    #[arg(long = "output-zip-uri")]
    pub output_zip_uri: String,

    /// URI of the output label map
    #[arg(long = "label-map-uri")]
    pub label_map_uri: String,

    /// Root for the uploaded manifest (defaults to settings)
    #[arg(long = "config-dir-uri")]
    pub config_dir_uri: Option<String>,

    /// Minimum area of bounding boxes to include
    #[arg(long = "min-area")]
    pub min_area: Option<f64>,

    /// Convert every label to this label
    #[arg(long = "single-label")]
    pub single_label: Option<String>,

    /// Keep partially visible objects instead of blacking them out
    #[arg(long = "allow-partial")]
    pub allow_partial: bool,

    /// GeoTIFF channel indices to map to RGB
    #[arg(long = "channel-order", num_args = 3, value_names = ["R", "G", "B"])]
    pub channel_order: Option<Vec<u32>>,
}

impl PrepTrainDataArgs {
    pub fn options(&self) -> Result<PrepTrainDataOptions> {
        let channel_order = match &self.channel_order {
            Some(indices) => Some(ChannelOrder::try_from(indices.as_slice())?),
            None => None,
        };

        Ok(PrepTrainDataOptions {
            min_area: self.min_area,
            single_label: self.single_label.clone(),
            no_partial: !self.allow_partial,
            channel_order,
        })
    }
}

pub async fn project_configs(ctx: &Context, args: ProjectConfigsArgs) -> anyhow::Result<()> {
    let session = ctx.connect().await?;
    let configs = session
        .project_configs(&args.project_ids, &args.annotation_uris)
        .await?;
    print_json(&configs)
}

pub async fn prep_train_data(ctx: &Context, args: PrepTrainDataArgs) -> anyhow::Result<()> {
    let request = PrepTrainDataRequest {
        options: args.options()?,
        project_config_dir_uri: args
            .config_dir_uri
            .unwrap_or_else(|| ctx.settings.project_config_dir_uri.clone()),
        project_ids: args.project_ids,
        annotation_uris: args.annotation_uris,
        output_zip_uri: args.output_zip_uri,
        label_map_uri: args.label_map_uri,
    };

    let session = ctx.connect().await?;
    let submitter = DryRunSubmitter::new(ctx.settings.batch.clone());
    let job_id = session
        .start_prep_train_data_job(&LocalManifestStore::new(), &submitter, &request)
        .await?;

    match ctx.format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "jobId": job_id,
            "requests": submitter.submitted(),
        }))?,
        OutputFormat::Text => {
            for submitted in submitter.submitted() {
                println!("Job name:  {}", submitted.job_name);
                println!("Queue:     {}", submitted.job_queue);
                println!("Command:   {}", submitted.container_overrides.command.join(" "));
            }
            println!("Job id:    {}", job_id);
        }
    }
    Ok(())
}
