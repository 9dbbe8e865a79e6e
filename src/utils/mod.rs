pub(crate) mod progress_bar_builder;

pub(crate) use progress_bar_builder::ProgressBarBuilder;
