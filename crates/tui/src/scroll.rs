/// Keeps the message list pinned to the newest entry unless the user has
/// scrolled away, and turns the pin back on when they return to the tail.
#[derive(Debug, Clone, Default)]
pub struct FollowTailState {
    /// Lines scrolled up from the bottom. Zero means pinned.
    pub scrolled_up: u16,
    pub detached_by_user: bool,
}

impl FollowTailState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_following(&self) -> bool {
        !self.detached_by_user && self.scrolled_up == 0
    }

    pub fn line_up(&mut self) {
        self.scrolled_up = self.scrolled_up.saturating_add(1);
        self.detached_by_user = true;
    }

    pub fn line_down(&mut self) {
        self.scrolled_up = self.scrolled_up.saturating_sub(1);
        if self.scrolled_up == 0 {
            self.detached_by_user = false;
        }
    }

    pub fn page_up(&mut self, page: u16) {
        self.scrolled_up = self.scrolled_up.saturating_add(page.max(1));
        self.detached_by_user = true;
    }

    pub fn page_down(&mut self, page: u16) {
        self.scrolled_up = self.scrolled_up.saturating_sub(page.max(1));
        if self.scrolled_up == 0 {
            self.detached_by_user = false;
        }
    }

    /// Jump back to the tail and re-pin.
    pub fn reattach(&mut self) {
        self.scrolled_up = 0;
        self.detached_by_user = false;
    }

    /// First visible line for a viewport of `height` over `total` lines.
    /// While following, the viewport hugs the bottom.
    pub fn top_offset(&self, total: u16, height: u16) -> u16 {
        let max_top = total.saturating_sub(height);
        max_top.saturating_sub(self.scrolled_up)
    }
}

#[cfg(test)]
mod tests {
    use super::FollowTailState;

    #[test]
    fn follows_the_tail_by_default() {
        let state = FollowTailState::default();
        assert!(state.is_following());
        assert_eq!(state.top_offset(100, 20), 80);
    }

    #[test]
    fn scrolling_up_detaches_and_returning_reattaches() {
        let mut state = FollowTailState::default();
        state.line_up();
        state.line_up();
        assert!(!state.is_following());
        assert_eq!(state.top_offset(100, 20), 78);

        state.line_down();
        state.line_down();
        assert!(state.is_following());
    }

    #[test]
    fn reattach_jumps_back_to_the_bottom() {
        let mut state = FollowTailState::default();
        state.page_up(10);
        state.reattach();
        assert!(state.is_following());
        assert_eq!(state.top_offset(100, 20), 80);
    }

    #[test]
    fn top_offset_clamps_when_scrolled_past_the_start() {
        let mut state = FollowTailState::default();
        state.page_up(200);
        assert_eq!(state.top_offset(100, 20), 0);
    }

    #[test]
    fn short_content_never_scrolls() {
        let state = FollowTailState::default();
        assert_eq!(state.top_offset(5, 20), 0);
    }
}
