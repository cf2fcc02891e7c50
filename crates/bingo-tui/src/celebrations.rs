use bingo_core::LineId;
use crossterm::style::Color;

/// Highlight of one freshly completed line
#[derive(Debug, Clone)]
pub struct Celebration {
    pub line: LineId,
    pub start_frame: u32,
    pub duration_frames: u32,
}

impl Celebration {
    pub fn new(line: LineId, current_frame: u32) -> Self {
        Self {
            line,
            start_frame: current_frame,
            duration_frames: 40, // ~2 seconds at 50ms ticks
        }
    }

    pub fn is_active(&self, current_frame: u32) -> bool {
        current_frame < self.start_frame + self.duration_frames
    }

    /// Pulsing intensity in `0.0..=1.0` that fades out over the duration
    pub fn intensity(&self, current_frame: u32) -> f32 {
        let elapsed = current_frame.saturating_sub(self.start_frame);
        if elapsed < 3 {
            return 1.0;
        }
        let fade = 1.0 - elapsed as f32 / self.duration_frames as f32;
        let pulse = (elapsed as f32 * 1.2).sin() * 0.5 + 0.5;
        (0.4 + pulse * 0.6) * fade.max(0.0)
    }
}

/// Tracks the lines currently being highlighted
#[derive(Debug, Default)]
pub struct CelebrationManager {
    celebrations: Vec<Celebration>,
    frame_count: u32,
}

impl CelebrationManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, lines: &[LineId]) {
        for &line in lines {
            self.celebrations.retain(|c| c.line != line);
            self.celebrations
                .push(Celebration::new(line, self.frame_count));
        }
    }

    /// Advance one frame and drop finished highlights
    pub fn update(&mut self) {
        self.frame_count += 1;
        let frame = self.frame_count;
        self.celebrations.retain(|c| c.is_active(frame));
    }

    pub fn reset(&mut self) {
        self.celebrations.clear();
        self.frame_count = 0;
    }

    /// Strongest highlight covering a cell (0.0 if none)
    pub fn cell_intensity(&self, index: usize, side: usize) -> f32 {
        self.celebrations
            .iter()
            .filter(|c| c.line.contains(index, side))
            .map(|c| c.intensity(self.frame_count))
            .fold(0.0, f32::max)
    }

    pub fn has_active_celebrations(&self) -> bool {
        !self.celebrations.is_empty()
    }

    /// Blend a color towards gold by `intensity`
    pub fn throb_color(base_color: Color, intensity: f32) -> Color {
        if intensity <= 0.0 {
            return base_color;
        }

        let (target_r, target_g, target_b) = (255.0, 215.0, 0.0);
        match base_color {
            Color::Rgb { r, g, b } => {
                let blend = (intensity * 0.85).min(0.95);
                Color::Rgb {
                    r: (r as f32 * (1.0 - blend) + target_r * blend) as u8,
                    g: (g as f32 * (1.0 - blend) + target_g * blend) as u8,
                    b: (b as f32 * (1.0 - blend) + target_b * blend) as u8,
                }
            }
            _ => Color::Yellow,
        }
    }
}
