use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar for environment lookups. Draws to stderr and stays hidden
/// when stderr is not a terminal.
pub struct ResolutionProgress {
    bar: ProgressBar,
}

impl ResolutionProgress {
    pub fn new(quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(0)
        };
        if let Ok(template) = ProgressStyle::default_bar()
            .template("[NOTE] making command list... {bar:30.cyan/dark_gray} {percent:>3}%")
        {
            bar.set_style(template.progress_chars("█▓░"));
        }
        Self { bar }
    }

    /// Engine observer: `done` of `total` lookups have finished.
    pub fn update(&self, done: usize, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(done as u64);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Drop for ResolutionProgress {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_tracks_position() {
        let progress = ResolutionProgress::new(true);
        progress.update(3, 10);
        assert_eq!(progress.bar.position(), 3);
        assert_eq!(progress.bar.length(), Some(10));
        progress.finish();
        assert!(progress.bar.is_finished());
    }
}
