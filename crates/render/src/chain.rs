//! Decay-chain diagrams
//!
//! Nodes are laid out in rows by generation, parents above progeny, with each
//! row centred horizontally. Positions are pixel coordinates of box centres
//! measured from the top-left corner of the image.

use decay::{readable_half_life, ChainEdge, Dataset, DecayChain};
use indexmap::IndexMap;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use serde::Serialize;

use crate::context::{FigureSize, RenderContext, RenderedImage};
use crate::error::Result;

/// Vertical room per generation, in inches
const ROW_HEIGHT_IN: f64 = 0.9;
/// Horizontal room per node in the widest row, in inches
const COLUMN_WIDTH_IN: f64 = 1.8;

const BOX_WIDTH: f64 = 120.0;
const BOX_HEIGHT: f64 = 44.0;
const TITLE_HEIGHT: f64 = 50.0;
const MARGIN: f64 = 20.0;

const RADIOACTIVE_FILL: RGBColor = RGBColor(214, 234, 248);
const STABLE_FILL: RGBColor = RGBColor(230, 230, 230);
const EDGE_COLOR: RGBColor = RGBColor(60, 60, 60);

/// Centre of a node box
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NodePosition {
    pub x: f64,
    pub y: f64,
}

/// Figure size for `chain`: at least `base`, grown to fit deep or wide chains
pub fn figure_size(chain: &DecayChain, base: FigureSize) -> FigureSize {
    let rows = chain.depth() + 1;
    let widest = row_counts(chain).into_values().max().unwrap_or(1);
    FigureSize::new(
        base.width_in.max(COLUMN_WIDTH_IN * widest as f64),
        base.height_in.max(ROW_HEIGHT_IN * rows as f64 + 0.5),
    )
}

fn row_counts(chain: &DecayChain) -> IndexMap<usize, usize> {
    let mut counts = IndexMap::new();
    for node in chain.nodes() {
        *counts.entry(node.generation).or_insert(0) += 1;
    }
    counts
}

/// Box positions for every node of a chain on a canvas
#[derive(Debug, Clone)]
pub struct ChainLayout {
    width: u32,
    height: u32,
    /// Pixels per 1/100 inch, so boxes keep their physical size across DPIs
    unit: f64,
    positions: IndexMap<&'static str, NodePosition>,
}

impl ChainLayout {
    pub fn compute(chain: &DecayChain, width: u32, height: u32, dpi: u32) -> Self {
        let unit = dpi as f64 / 100.0;
        let rows = chain.depth() + 1;
        let top = (TITLE_HEIGHT + MARGIN) * unit;
        let row_height = ((height as f64 - top - MARGIN * unit) / rows as f64).max(1.0);
        let counts = row_counts(chain);

        let mut seen: IndexMap<usize, usize> = IndexMap::new();
        let positions = chain
            .nodes()
            .iter()
            .map(|node| {
                let in_row = counts.get(&node.generation).copied().unwrap_or(1);
                let slot = seen.entry(node.generation).or_insert(0);
                let x = width as f64 * (*slot as f64 + 0.5) / in_row as f64;
                *slot += 1;
                let y = top + row_height * (node.generation as f64 + 0.5);
                (node.name, NodePosition { x, y })
            })
            .collect();

        Self {
            width,
            height,
            unit,
            positions,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn position(&self, name: &str) -> Option<NodePosition> {
        self.positions.get(name).copied()
    }

    /// Positions in node order
    pub fn positions(&self) -> impl Iterator<Item = (&'static str, NodePosition)> + '_ {
        self.positions.iter().map(|(name, pos)| (*name, *pos))
    }

    fn box_size(&self) -> (f64, f64) {
        (BOX_WIDTH * self.unit, BOX_HEIGHT * self.unit)
    }
}

/// A chain plus everything needed to draw it
pub struct ChainDiagram<'a> {
    chain: &'a DecayChain,
    dataset: &'a Dataset,
    layout: ChainLayout,
}

impl<'a> ChainDiagram<'a> {
    pub fn new(chain: &'a DecayChain, dataset: &'a Dataset, width: u32, height: u32, dpi: u32) -> Self {
        Self {
            chain,
            dataset,
            layout: ChainLayout::compute(chain, width, height, dpi),
        }
    }

    pub fn layout(&self) -> &ChainLayout {
        &self.layout
    }

    pub fn into_layout(self) -> ChainLayout {
        self.layout
    }

    pub fn draw<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> Result<()> {
        let unit = self.layout.unit;
        area.fill(&WHITE)?;

        let title = TextStyle::from(("sans-serif", 22.0 * unit).into_font())
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Top));
        area.draw(&Text::new(
            format!("Decay Chain of {}", self.chain.root()),
            ((self.layout.width / 2) as i32, (MARGIN * unit) as i32),
            title,
        ))?;

        for (lane, edge) in self.chain.edges().iter().enumerate() {
            self.draw_edge(area, edge, lane)?;
        }
        for node in self.chain.nodes() {
            self.draw_node(area, node.name)?;
        }
        Ok(())
    }

    fn draw_node<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>, name: &str) -> Result<()> {
        let Some(center) = self.layout.position(name) else {
            return Ok(());
        };
        let unit = self.layout.unit;
        let (bw, bh) = self.layout.box_size();
        let record = self.dataset.get(name);
        let fill = match record {
            Some(r) if r.is_stable() => STABLE_FILL,
            _ => RADIOACTIVE_FILL,
        };

        let corner = |dx: f64, dy: f64| ((center.x + dx) as i32, (center.y + dy) as i32);
        area.draw(&Rectangle::new(
            [corner(-bw / 2.0, -bh / 2.0), corner(bw / 2.0, bh / 2.0)],
            fill.filled(),
        ))?;
        area.draw(&Rectangle::new(
            [corner(-bw / 2.0, -bh / 2.0), corner(bw / 2.0, bh / 2.0)],
            BLACK.stroke_width(1),
        ))?;

        let centered = |size: f64| {
            TextStyle::from(("sans-serif", size * unit).into_font())
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Center))
        };
        area.draw(&Text::new(
            name.to_string(),
            corner(0.0, -bh / 5.0),
            centered(15.0),
        ))?;
        if let Some(record) = record {
            area.draw(&Text::new(
                readable_half_life(record.half_life),
                corner(0.0, bh / 4.0),
                centered(12.0),
            ))?;
        }
        Ok(())
    }

    fn draw_edge<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        edge: &ChainEdge,
        lane: usize,
    ) -> Result<()> {
        let (Some(from), Some(to)) = (
            self.layout.position(edge.parent),
            self.layout.position(edge.progeny),
        ) else {
            return Ok(());
        };
        let (Some(parent), Some(progeny)) = (self.chain.node(edge.parent), self.chain.node(edge.progeny)) else {
            return Ok(());
        };
        let unit = self.layout.unit;
        let (bw, bh) = self.layout.box_size();
        let px = |x: f64, y: f64| (x as i32, y as i32);

        let skips_rows = progeny.generation > parent.generation + 1;
        let (path, label_at, label_pos) = if skips_rows {
            // Route around the rows in between instead of through their boxes
            let side = from.x.max(to.x) + bw / 2.0 + (24.0 + 10.0 * (lane % 3) as f64) * unit;
            let path = vec![
                px(from.x + bw / 2.0, from.y),
                px(side, from.y),
                px(side, to.y),
                px(to.x + bw / 2.0, to.y),
            ];
            (
                path,
                px(side + 4.0 * unit, (from.y + to.y) / 2.0),
                Pos::new(HPos::Left, VPos::Center),
            )
        } else {
            let start = px(from.x, from.y + bh / 2.0);
            let end = px(to.x, to.y - bh / 2.0);
            let mid = ((from.x + to.x) / 2.0 + 6.0 * unit, (from.y + to.y) / 2.0);
            (vec![start, end], px(mid.0, mid.1), Pos::new(HPos::Left, VPos::Center))
        };

        area.draw(&PathElement::new(path.clone(), EDGE_COLOR.stroke_width(2)))?;
        if let [.., tail, tip] = path.as_slice() {
            area.draw(&Polygon::new(
                arrow_head(*tail, *tip, 9.0 * unit),
                EDGE_COLOR.filled(),
            ))?;
        }

        let label = TextStyle::from(("sans-serif", 12.0 * unit).into_font())
            .color(&EDGE_COLOR)
            .pos(label_pos);
        area.draw(&Text::new(
            format!("{} {}%", edge.mode, format_percent(edge.branching * 100.0)),
            label_at,
            label,
        ))?;
        Ok(())
    }
}

/// Triangle pointing at `tip`, aligned with the segment from `tail`
fn arrow_head(tail: (i32, i32), tip: (i32, i32), size: f64) -> Vec<(i32, i32)> {
    let (dx, dy) = ((tip.0 - tail.0) as f64, (tip.1 - tail.1) as f64);
    let len = (dx * dx + dy * dy).sqrt().max(1.0);
    let (ux, uy) = (dx / len, dy / len);
    let base = (tip.0 as f64 - ux * size, tip.1 as f64 - uy * size);
    let half = size / 2.0;
    vec![
        tip,
        ((base.0 - uy * half) as i32, (base.1 + ux * half) as i32),
        ((base.0 + uy * half) as i32, (base.1 - ux * half) as i32),
    ]
}

/// `99.84`, `100`, `0.0037`
fn format_percent(value: f64) -> String {
    let text = if value >= 1.0 {
        format!("{:.2}", value)
    } else {
        format!("{:.4}", value)
    };
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Render the diagram for `chain` and return the image with its layout
pub fn render_chain(
    chain: &DecayChain,
    dataset: &Dataset,
    base: FigureSize,
    dpi: u32,
) -> Result<(RenderedImage, ChainLayout)> {
    let mut ctx = RenderContext::for_figure(figure_size(chain, base), dpi)?;
    let (width, height) = ctx.size();
    let diagram = ChainDiagram::new(chain, dataset, width, height, dpi);
    ctx.draw(|area| diagram.draw(area))?;
    let image = ctx.finish()?;
    Ok((image, diagram.into_layout()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(root: &str) -> DecayChain {
        DecayChain::from_root(Dataset::embedded(), root).unwrap()
    }

    #[test]
    fn test_layout_rows_by_generation() {
        let chain = chain("Cs-137");
        let layout = ChainLayout::compute(&chain, 1200, 800, 100);
        let cs = layout.position("Cs-137").unwrap();
        let ba_m = layout.position("Ba-137m").unwrap();
        let ba = layout.position("Ba-137").unwrap();
        assert!(cs.y < ba_m.y && ba_m.y < ba.y);
        assert_eq!(cs.x, 600.0);
        assert_eq!(layout.positions().count(), 3);
    }

    #[test]
    fn test_layout_centres_rows() {
        let chain = chain("Bi-212");
        let layout = ChainLayout::compute(&chain, 1000, 600, 100);
        let po = layout.position("Po-212").unwrap();
        let tl = layout.position("Tl-208").unwrap();
        assert_eq!(po.y, tl.y);
        assert_eq!(po.x, 250.0);
        assert_eq!(tl.x, 750.0);
    }

    #[test]
    fn test_figure_grows_with_depth() {
        let base = FigureSize::new(12.0, 8.0);
        assert_eq!(figure_size(&chain("Co-60"), base), base);
        let deep = figure_size(&chain("U-238"), base);
        assert!(deep.height_in > base.height_in);
        assert_eq!(deep.width_in, base.width_in);
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(99.84), "99.84");
        assert_eq!(format_percent(100.0), "100");
        assert_eq!(format_percent(0.0037), "0.0037");
        assert_eq!(format_percent(35.94), "35.94");
    }

    #[test]
    fn test_arrow_head_points_down() {
        let head = arrow_head((100, 0), (100, 100), 10.0);
        assert_eq!(head[0], (100, 100));
        assert!(head[1].1 < 100 && head[2].1 < 100);
    }

    #[test]
    fn test_render_chain_png() {
        let chain = chain("Th-232");
        let (image, layout) = render_chain(&chain, Dataset::embedded(), FigureSize::new(6.0, 4.0), 50).unwrap();
        assert_eq!(&image.png[1..4], b"PNG");
        assert_eq!(layout.size(), (image.width, image.height));
        assert_eq!(layout.positions().count(), chain.nodes().len());
    }
}
