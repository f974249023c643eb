pub struct Config {
    /// Suppresses decorative output.
    ///
    /// 0 prints headers and summaries, 1 prints results only.
    pub quiet: u8,
}
