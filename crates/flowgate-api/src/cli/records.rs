//! `flowgate records …` -- drive the Directus record dispatcher from the
//! terminal.

use anyhow::Context;

use flowgate_infra::config::{self, FlowgateConfig};
use flowgate_infra::directus::DirectusClient;
use flowgate_types::record::{FileUpload, RecordOperation};

use super::RecordsCommand;

/// Execute one records subcommand and print the result.
pub async fn run(
    config: &FlowgateConfig,
    command: RecordsCommand,
    json: bool,
) -> anyhow::Result<()> {
    let credentials = config::directus_credentials_from_env(&config.directus).with_context(|| {
        format!(
            "directus.base_url must be configured and {} set",
            config::DIRECTUS_TOKEN_ENV
        )
    })?;

    let operation = build_operation(command).await?;
    let name = operation.name();

    let client = DirectusClient::new();
    let result = client.execute(&credentials, operation).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!();
        println!(
            "  {} {} completed",
            console::style("✓").green(),
            console::style(name).cyan()
        );
        println!();
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    Ok(())
}

/// Translate a parsed subcommand into a [`RecordOperation`], reading the
/// upload payload from disk when needed.
async fn build_operation(command: RecordsCommand) -> anyhow::Result<RecordOperation> {
    Ok(match command {
        RecordsCommand::Create { collection, data } => RecordOperation::Create {
            collection,
            data: serde_json::from_str(&data).context("--data is not valid JSON")?,
        },

        RecordsCommand::Update {
            collection,
            record_id,
            data,
        } => RecordOperation::Update {
            collection,
            record_id,
            data: serde_json::from_str(&data).context("--data is not valid JSON")?,
        },

        RecordsCommand::Delete {
            collection,
            record_id,
        } => RecordOperation::Delete {
            collection,
            record_id,
        },

        RecordsCommand::FindOne {
            collection,
            record_id,
        } => RecordOperation::FindOne {
            collection,
            record_id,
        },

        RecordsCommand::FindMany {
            collection,
            filter,
            fields,
        } => RecordOperation::FindMany {
            collection,
            filter: filter
                .map(|f| serde_json::from_str(&f).context("--filter is not valid JSON"))
                .transpose()?,
            fields,
        },

        RecordsCommand::Upload {
            path,
            file_name,
            content_type,
            folder,
            title,
            description,
        } => {
            let data = tokio::fs::read(&path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;
            let file_name = file_name.unwrap_or_else(|| {
                path.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "upload.bin".to_string())
            });
            let content_type =
                content_type.unwrap_or_else(|| "application/octet-stream".to_string());

            let mut upload = FileUpload::new(file_name, content_type, data);
            upload.folder = folder;
            upload.title = title;
            upload.description = description;
            RecordOperation::Upload(upload)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_create_parses_data() {
        let op = build_operation(RecordsCommand::Create {
            collection: "articles".to_string(),
            data: r#"{"title":"x"}"#.to_string(),
        })
        .await
        .unwrap();

        match op {
            RecordOperation::Create { collection, data } => {
                assert_eq!(collection, "articles");
                assert_eq!(data["title"], "x");
            }
            other => panic!("unexpected operation: {}", other.name()),
        }
    }

    #[tokio::test]
    async fn test_build_create_rejects_bad_json() {
        let result = build_operation(RecordsCommand::Create {
            collection: "articles".to_string(),
            data: "not json".to_string(),
        })
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_build_upload_defaults_name_from_path() {
        let tmp = std::env::temp_dir().join("flowgate-upload-test.mp3");
        tokio::fs::write(&tmp, b"abc").await.unwrap();

        let op = build_operation(RecordsCommand::Upload {
            path: tmp.clone(),
            file_name: None,
            content_type: None,
            folder: None,
            title: None,
            description: None,
        })
        .await
        .unwrap();

        match op {
            RecordOperation::Upload(upload) => {
                assert_eq!(upload.file_name, "flowgate-upload-test.mp3");
                assert_eq!(upload.content_type, "application/octet-stream");
                assert_eq!(upload.data, b"abc");
            }
            other => panic!("unexpected operation: {}", other.name()),
        }

        tokio::fs::remove_file(&tmp).await.ok();
    }
}
