//! Value command implementation

use super::InputArgs;
use crate::config::Config;
use crate::report::Summary;
use clap::Args;

#[derive(Args, Debug)]
pub struct ValueArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Append the model explanation
    #[arg(long)]
    pub explain: bool,
}

impl ValueArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let (params, analysis) = self.inputs.analyze(config)?;

        let mut summary = Summary::new(&analysis, &config.controls);
        if self.explain {
            summary = summary.with_explanation(params);
        }
        print!("{summary}");
        Ok(())
    }
}
