use std::time::{Duration, Instant};

/// スクロール位置から「追加ロード」を発火させるか判定する。
/// 直近の発火からデバウンス窓が空くまでは再発火しない。
/// クロックは引数で受け取るため判定自体は純粋。
#[derive(Debug)]
pub struct LoadMoreTrigger {
    threshold: usize,
    debounce: Duration,
    last_fired: Option<Instant>,
}

impl LoadMoreTrigger {
    pub fn new(threshold: usize, debounce: Duration) -> Self {
        Self {
            threshold,
            debounce,
            last_fired: None,
        }
    }

    /// 最後に見えている項目が描画済みリスト末尾のthreshold件以内に
    /// 入ったら発火する。
    pub fn should_fire(
        &mut self,
        last_visible_index: usize,
        rendered_len: usize,
        now: Instant,
    ) -> bool {
        if rendered_len == 0 || last_visible_index >= rendered_len {
            return false;
        }
        let near_end = last_visible_index + self.threshold + 1 >= rendered_len;
        if !near_end {
            return false;
        }
        if let Some(last) = self.last_fired {
            if now.duration_since(last) < self.debounce {
                return false;
            }
        }
        self.last_fired = Some(now);
        true
    }
}
