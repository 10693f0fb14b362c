//! Command line for the remote `prep_train_data` job
//!
//! The batch executor runs a single command string, so every value placed in
//! it is checked for whitespace and shell metacharacters first. A value that
//! would split or escape its argument is refused instead of quoted.

use std::fmt;
use uuid::Uuid;

use crate::core::{ClientError, Result};

/// Fixed prefix of every prep job command
pub const BASE_COMMAND: &str = "python -m rv.run prep_train_data --debug --chip-size 300 ";

pub const JOB_NAME_PREFIX: &str = "prep_train_data_";

const SHELL_METACHARACTERS: &[char] = &[
    '\'', '"', '`', '$', '\\', ';', '&', '|', '<', '>', '(', ')', '{', '}', '[', ']', '*', '?', '!',
];

/// GeoTIFF channel indices mapped to red, green and blue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelOrder([u32; 3]);

impl ChannelOrder {
    pub fn new(red: u32, green: u32, blue: u32) -> Self {
        Self([red, green, blue])
    }

    pub fn indices(&self) -> [u32; 3] {
        self.0
    }
}

impl TryFrom<&[u32]> for ChannelOrder {
    type Error = ClientError;

    fn try_from(indices: &[u32]) -> Result<Self> {
        <[u32; 3]>::try_from(indices)
            .map(ChannelOrder)
            .map_err(|_| ClientError::InvalidChannelOrder(indices.len()))
    }
}

impl TryFrom<Vec<u32>> for ChannelOrder {
    type Error = ClientError;

    fn try_from(indices: Vec<u32>) -> Result<Self> {
        ChannelOrder::try_from(indices.as_slice())
    }
}

impl fmt::Display for ChannelOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "{} {} {}", r, g, b)
    }
}

/// Tuning knobs for training data preparation
#[derive(Debug, Clone, PartialEq)]
pub struct PrepTrainDataOptions {
    /// Minimum area of bounding boxes to include
    pub min_area: Option<f64>,
    /// Convert every label to this one
    pub single_label: Option<String>,
    /// Black out partially visible objects
    pub no_partial: bool,
    pub channel_order: Option<ChannelOrder>,
}

impl Default for PrepTrainDataOptions {
    fn default() -> Self {
        Self {
            min_area: None,
            single_label: None,
            no_partial: true,
            channel_order: None,
        }
    }
}

/// Reject values that cannot stand as a single shell word
pub(crate) fn check_argument(name: &'static str, value: &str) -> Result<()> {
    let unsafe_char = |c: char| c.is_whitespace() || c.is_control() || SHELL_METACHARACTERS.contains(&c);
    if value.is_empty() || value.contains(unsafe_char) {
        return Err(ClientError::UnsafeJobArgument {
            name,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// A validated prep job command, waiting for its manifest URI
#[derive(Debug, Clone, PartialEq)]
pub struct PrepTrainDataCommand {
    output_zip_uri: String,
    label_map_uri: String,
    options: PrepTrainDataOptions,
}

impl PrepTrainDataCommand {
    pub fn new(
        output_zip_uri: impl Into<String>,
        label_map_uri: impl Into<String>,
        options: PrepTrainDataOptions,
    ) -> Result<Self> {
        let command = Self {
            output_zip_uri: output_zip_uri.into(),
            label_map_uri: label_map_uri.into(),
            options,
        };

        check_argument("output_zip_uri", &command.output_zip_uri)?;
        check_argument("label_map_uri", &command.label_map_uri)?;
        if let Some(label) = &command.options.single_label {
            check_argument("single_label", label)?;
        }
        if let Some(min_area) = command.options.min_area {
            if !min_area.is_finite() {
                return Err(ClientError::UnsafeJobArgument {
                    name: "min_area",
                    value: min_area.to_string(),
                });
            }
        }

        Ok(command)
    }

    /// Full command line reading the manifest at `config_uri`.
    ///
    /// Flags always appear in the same order: min area, single label,
    /// partial exclusion, channel order, then the three positional URIs.
    pub fn render(&self, config_uri: &str) -> Result<String> {
        check_argument("config_uri", config_uri)?;

        let options = &self.options;
        let mut command = String::from(BASE_COMMAND);
        if let Some(min_area) = options.min_area {
            command.push_str(&format!("--min-area {:?} ", min_area));
        }
        if let Some(label) = &options.single_label {
            command.push_str(&format!("--single-label {} ", label));
        }
        if options.no_partial {
            command.push_str("--no-partial ");
        }
        if let Some(order) = &options.channel_order {
            command.push_str(&format!("--channel-order {} ", order));
        }
        command.push_str(&format!(
            "{} {} {}",
            config_uri, self.output_zip_uri, self.label_map_uri
        ));

        Ok(command)
    }
}

/// Fresh job name; time-ordered and unique across callers
pub fn job_name() -> String {
    format!("{}{}", JOB_NAME_PREFIX, Uuid::now_v7())
}

/// A named command ready for the batch executor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchJob {
    pub name: String,
    pub command: String,
}

impl BatchJob {
    /// Wrap `command` under a freshly generated job name
    pub fn new(command: String) -> Self {
        Self {
            name: job_name(),
            command,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn full_options() -> PrepTrainDataOptions {
        PrepTrainDataOptions {
            min_area: Some(0.5),
            single_label: Some("car".to_string()),
            no_partial: true,
            channel_order: Some(ChannelOrder::new(2, 1, 0)),
        }
    }

    #[test]
    fn test_render_all_options() {
        let command = PrepTrainDataCommand::new("o.zip", "l.json", full_options()).unwrap();
        assert_eq!(
            command.render("m").unwrap(),
            "python -m rv.run prep_train_data --debug --chip-size 300 \
             --min-area 0.5 --single-label car --no-partial --channel-order 2 1 0 m o.zip l.json"
        );
    }

    #[test]
    fn test_whole_min_area_keeps_decimal_point() {
        let options = PrepTrainDataOptions {
            min_area: Some(1.0),
            ..PrepTrainDataOptions::default()
        };
        let command = PrepTrainDataCommand::new("o.zip", "l.json", options).unwrap();
        assert!(command.render("m").unwrap().contains("--min-area 1.0 --no-partial "));
    }

    #[test]
    fn test_render_is_deterministic() {
        let command = PrepTrainDataCommand::new("o.zip", "l.json", full_options()).unwrap();
        let first = command.render("m").unwrap();
        for _ in 0..10 {
            assert_eq!(command.render("m").unwrap(), first);
        }
    }

    #[test]
    fn test_render_defaults() {
        let command = PrepTrainDataCommand::new("s3://out/train.zip", "s3://out/labels.pbtxt", Default::default()).unwrap();
        assert_eq!(
            command.render("s3://configs/x.json").unwrap(),
            "python -m rv.run prep_train_data --debug --chip-size 300 \
             --no-partial s3://configs/x.json s3://out/train.zip s3://out/labels.pbtxt"
        );
    }

    #[test]
    fn test_render_allowing_partial() {
        let options = PrepTrainDataOptions {
            no_partial: false,
            ..Default::default()
        };
        let command = PrepTrainDataCommand::new("o.zip", "l.json", options).unwrap();
        assert_eq!(
            command.render("m").unwrap(),
            "python -m rv.run prep_train_data --debug --chip-size 300 m o.zip l.json"
        );
    }

    #[test]
    fn test_unsafe_values_rejected() {
        let options = PrepTrainDataOptions {
            single_label: Some("car; rm -rf /".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            PrepTrainDataCommand::new("o.zip", "l.json", options),
            Err(ClientError::UnsafeJobArgument { name: "single_label", .. })
        ));
        assert!(PrepTrainDataCommand::new("my output.zip", "l.json", Default::default()).is_err());
        assert!(PrepTrainDataCommand::new("o.zip", "", Default::default()).is_err());

        let command = PrepTrainDataCommand::new("o.zip", "l.json", Default::default()).unwrap();
        assert!(command.render("s3://x/$(whoami).json").is_err());
    }

    #[test]
    fn test_non_finite_min_area_rejected() {
        let options = PrepTrainDataOptions {
            min_area: Some(f64::NAN),
            ..Default::default()
        };
        assert!(PrepTrainDataCommand::new("o.zip", "l.json", options).is_err());
    }

    #[test]
    fn test_channel_order_needs_three() {
        assert_eq!(ChannelOrder::try_from(vec![2, 1, 0]).unwrap(), ChannelOrder::new(2, 1, 0));
        assert!(matches!(
            ChannelOrder::try_from(vec![0, 1]),
            Err(ClientError::InvalidChannelOrder(2))
        ));
        assert!(ChannelOrder::try_from(vec![0, 1, 2, 3]).is_err());
    }

    #[test]
    fn test_job_names_unique() {
        let names: HashSet<String> = (0..10_000).map(|_| job_name()).collect();
        assert_eq!(names.len(), 10_000);
        assert!(names.iter().all(|n| n.starts_with(JOB_NAME_PREFIX)));
    }

    #[test]
    fn test_job_names_time_ordered() {
        let first = job_name();
        let second = job_name();
        assert!(first < second);
    }
}
