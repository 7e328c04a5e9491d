/// Counters for the most recently completed frame.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Stats {
    /// Frames completed so far.
    pub frame: u32,
    pub width: u32,
    pub height: u32,
    /// Time between the last two `frame()` calls, in microseconds.
    pub frame_time_us: u64,
    pub dynamic_vertex_buffers: u32,
    pub dynamic_index_buffers: u32,
    /// Bytes written to dynamic vertex buffers during the frame.
    pub vertex_bytes_uploaded: u64,
    /// Bytes written to dynamic index buffers during the frame.
    pub index_bytes_uploaded: u64,
    /// Views cleared during the frame.
    pub views_processed: u32,
}

impl Stats {
    /// Lines of the built-in stats page.
    pub fn page(&self, renderer: &str, vsync: bool) -> Vec<String> {
        vec![
            format!("renderer: {renderer}"),
            format!(
                "backbuffer: {}x{}  vsync: {}",
                self.width,
                self.height,
                if vsync { "on" } else { "off" }
            ),
            format!(
                "frame: {}  cpu: {:.3} ms",
                self.frame,
                self.frame_time_us as f64 / 1000.0
            ),
            format!("views: {}", self.views_processed),
            format!(
                "dynamic vb: {}  ib: {}",
                self.dynamic_vertex_buffers, self.dynamic_index_buffers
            ),
            format!(
                "uploaded vb: {} B  ib: {} B",
                self.vertex_bytes_uploaded, self.index_bytes_uploaded
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_reports_uploads() {
        let stats = Stats {
            frame: 3,
            width: 1280,
            height: 720,
            frame_time_us: 16_667,
            dynamic_vertex_buffers: 1,
            dynamic_index_buffers: 1,
            vertex_bytes_uploaded: 3_180_060,
            index_bytes_uploaded: 636_012,
            views_processed: 1,
        };
        let page = stats.page("Vulkan", true);
        assert_eq!(page[1], "backbuffer: 1280x720  vsync: on");
        assert_eq!(page[2], "frame: 3  cpu: 16.667 ms");
        assert_eq!(page[5], "uploaded vb: 3180060 B  ib: 636012 B");
    }
}
