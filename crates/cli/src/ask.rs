use crate::config::AppConfig;
use anyhow::Result;
use clap::Parser;
use flowqa::{create_provider, ProcessorConfig, QaProcessor, Routed};

#[derive(Parser, Debug, Clone)]
pub struct AskArgs {
    /// The question to ask (overrides the configured property)
    #[arg(long)]
    pub question: Option<String>,
    /// The context paragraph (overrides the configured property)
    #[arg(long)]
    pub paragraph: Option<String>,
}

/// Triggers the processor once without an incoming record.
pub async fn handle_ask(mut config: AppConfig, args: &AskArgs) -> Result<Routed> {
    if let Some(question) = &args.question {
        config.processor.question = question.clone();
    }
    if let Some(paragraph) = &args.paragraph {
        config.processor.paragraph = paragraph.clone();
    }

    let processor_config = ProcessorConfig::try_from(config.processor)?;
    let provider = create_provider(&config.provider)?;
    let processor = QaProcessor::on_scheduled(processor_config, provider).await?;

    Ok(processor.on_trigger(None).await)
}
