//! Painting the text area onto a [`Surface`].

use crate::buffer::{ClipRect, Surface};
use crate::unicode::{ClusterClass, can_break_between, cluster_width, graphemes, is_hard_break};

use super::stepper::Stepper;
use super::textarea::{Selection, TextArea};

/// One placeholder cluster with its layout facts.
struct PlaceholderCluster<'a> {
    text: &'a str,
    width: usize,
    hard_break: bool,
    space: bool,
    can_break_after: bool,
}

impl TextArea {
    /// Draw the visible rows into `area` of `surface`.
    ///
    /// The area is clipped to the surface and remembered for mouse
    /// coordinates; the viewport takes its size.
    pub fn draw(&mut self, surface: &mut dyn Surface, area: ClipRect) {
        let (surface_width, surface_height) = surface.size();
        let area = area
            .intersect(&ClipRect::new(0, 0, surface_width, surface_height))
            .unwrap_or(ClipRect::new(area.x, area.y, 0, 0));
        self.area = area;
        self.set_size(area.width as usize, area.height as usize);

        let text_style = self.config.text_style;
        for y in 0..area.height {
            for x in 0..area.width {
                surface.set_content(area.x + x, area.y + y, ' ', &[], text_style);
            }
        }
        if area.is_empty() {
            return;
        }

        if self.chain.is_empty() && !self.config.placeholder.is_empty() {
            self.draw_placeholder(surface, area);
            return;
        }

        let selection = self.has_selection().then(|| self.selection());
        let height = area.height as usize;
        self.extend_lines(self.row_offset + height);
        for screen_row in 0..height {
            let row = self.row_offset + screen_row;
            if row >= self.layout.known_rows() {
                break;
            }
            self.draw_row(surface, area, screen_row as u32, row, selection);
        }
    }

    fn draw_row(
        &self,
        surface: &mut dyn Surface,
        area: ClipRect,
        y: u32,
        row: usize,
        selection: Option<Selection>,
    ) {
        let Some(start) = self.layout.row_start(row) else {
            return;
        };
        let end = self.layout.row_end(row);
        let width = area.width as usize;
        let mut selected = selection.is_some_and(|s| s.from_row < row && row <= s.to_row);
        let mut x = 0;

        for step in Stepper::new(&self.chain, start, self.layout.options()) {
            if step.start == end || x >= self.column_offset + width {
                break;
            }
            if let Some(sel) = selection {
                if step.start == sel.from {
                    selected = true;
                }
                if step.start == sel.to {
                    selected = false;
                }
            }
            let style = if selected {
                self.config.selected_style
            } else {
                self.config.text_style
            };

            let left = x;
            x += step.width;
            if step.width == 0 || step.class == ClusterClass::Newline {
                continue;
            }
            if left < self.column_offset || x > self.column_offset + width {
                continue;
            }
            let sx = area.x + (left - self.column_offset) as u32;
            let sy = area.y + y;
            if step.cluster == "\t" {
                for dx in 0..step.width as u32 {
                    surface.set_content(sx + dx, sy, ' ', &[], style);
                }
                continue;
            }
            let mut chars = step.cluster.chars();
            let Some(primary) = chars.next() else {
                continue;
            };
            let combining: Vec<char> = chars.collect();
            surface.set_content(sx, sy, primary, &combining, style);
        }
    }

    /// Word-wrapped placeholder, shown while the text is empty.
    fn draw_placeholder(&self, surface: &mut dyn Surface, area: ClipRect) {
        let opts = self.layout.options();
        let placeholder = self.config.placeholder.as_str();
        let mut clusters: Vec<PlaceholderCluster<'_>> = Vec::new();
        let mut iter = graphemes(placeholder).peekable();
        while let Some(text) = iter.next() {
            let next = iter.peek().copied();
            clusters.push(PlaceholderCluster {
                text,
                width: cluster_width(text, opts.tab_size, opts.width_method),
                hard_break: is_hard_break(text),
                space: ClusterClass::of(text) == ClusterClass::Space,
                can_break_after: next.is_some_and(|next| can_break_between(text, next)),
            });
        }

        let width = area.width as usize;
        let rows = wrap_placeholder(&clusters, width);
        let style = self.config.placeholder_style;
        for (y, row) in rows.into_iter().take(area.height as usize).enumerate() {
            let sy = area.y + y as u32;
            let mut x = 0;
            for cluster in &clusters[row] {
                if cluster.hard_break || cluster.width == 0 {
                    continue;
                }
                if x + cluster.width > width {
                    break;
                }
                let sx = area.x + x as u32;
                if cluster.text == "\t" {
                    for dx in 0..cluster.width as u32 {
                        surface.set_content(sx + dx, sy, ' ', &[], style);
                    }
                } else {
                    let mut chars = cluster.text.chars();
                    if let Some(primary) = chars.next() {
                        let combining: Vec<char> = chars.collect();
                        surface.set_content(sx, sy, primary, &combining, style);
                    }
                }
                x += cluster.width;
            }
        }
    }
}

/// Split placeholder clusters into rows of at most `width` columns,
/// moving the last word to the next row when a row overflows.
fn wrap_placeholder(
    clusters: &[PlaceholderCluster<'_>],
    width: usize,
) -> Vec<std::ops::Range<usize>> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut row_start = 0;
    let mut line_width = 0;
    let mut width_since_break = 0;
    let mut last_break: Option<usize> = None;

    for (i, cluster) in clusters.iter().enumerate() {
        if cluster.hard_break {
            rows.push(row_start..i + 1);
            row_start = i + 1;
            line_width = 0;
            width_since_break = 0;
            last_break = None;
            continue;
        }
        line_width += cluster.width;
        width_since_break += cluster.width;
        if line_width > width && cluster.width > 0 && !cluster.space {
            match last_break {
                Some(brk) if brk > row_start => {
                    rows.push(row_start..brk);
                    row_start = brk;
                    line_width = width_since_break;
                    if line_width > width && i > brk {
                        rows.push(brk..i);
                        row_start = i;
                        line_width = cluster.width;
                        width_since_break = cluster.width;
                    }
                }
                _ if i > row_start => {
                    rows.push(row_start..i);
                    row_start = i;
                    line_width = cluster.width;
                    width_since_break = cluster.width;
                }
                _ => {}
            }
            last_break = None;
        }
        if cluster.can_break_after {
            last_break = Some(i + 1);
            width_since_break = 0;
        }
    }
    rows.push(row_start..clusters.len());
    rows
}

/// Render a text area into a fresh buffer of its size and return the rows.
#[cfg(test)]
pub(crate) fn render_rows(area: &mut TextArea, width: u32, height: u32) -> Vec<String> {
    let mut buffer = crate::buffer::CellBuffer::new(width, height);
    area.draw(&mut buffer, ClipRect::new(0, 0, width, height));
    (0..height).map(|y| buffer.row_text(y)).collect()
}
