//! Visualization utilities for parking_planner
//!
//! Collects plot series for a scenario and draws them with gnuplot. Nothing
//! here feeds back into planning.

use gnuplot::{AutoOption, AxesCommon, Caption, Color, Figure, LineWidth, PointSize, PointSymbol};
use itertools::Itertools;

use crate::common::Polygon2D;
use crate::kinematics::{RigidPose2D, VehicleState};
use crate::planning::SearchTree;
use crate::scenario::{MapObject, ObjectKind, OccupancyMap};

/// Color palette for consistent styling
pub mod colors {
    pub const BLACK: &str = "#000000";
    pub const RED: &str = "#FF0000";
    pub const GREEN: &str = "#00FF00";
    pub const BLUE: &str = "#0000FF";
    pub const GRAY: &str = "#808080";
    pub const LIGHT_GRAY: &str = "#C8C8C8";

    // Semantic colors
    pub const CAR: &str = RED;
    pub const PARKING_SPOT: &str = GRAY;
    pub const BLOCKED_CELL: &str = "#FF9999";
    pub const MARKED_CELL: &str = LIGHT_GRAY;
    pub const START: &str = GREEN;
    pub const GOAL: &str = BLUE;
    pub const PATH: &str = RED;
    pub const EGO: &str = BLUE;
}

/// Style for path rendering
#[derive(Debug, Clone)]
pub struct PathStyle {
    pub color: String,
    pub line_width: f64,
    pub caption: String,
}

impl PathStyle {
    pub fn new(color: &str, caption: &str) -> Self {
        Self {
            color: color.to_string(),
            line_width: 2.0,
            caption: caption.to_string(),
        }
    }

    pub fn with_line_width(mut self, width: f64) -> Self {
        self.line_width = width;
        self
    }
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            color: colors::PATH.to_string(),
            line_width: 2.0,
            caption: "Path".to_string(),
        }
    }
}

/// Style for point rendering
#[derive(Debug, Clone)]
pub struct PointStyle {
    pub color: String,
    pub size: f64,
    pub symbol: char,
    pub caption: String,
}

impl PointStyle {
    pub fn new(color: &str, caption: &str) -> Self {
        Self {
            color: color.to_string(),
            size: 1.0,
            symbol: 'O',
            caption: caption.to_string(),
        }
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn with_symbol(mut self, symbol: char) -> Self {
        self.symbol = symbol;
        self
    }
}

#[derive(Debug, Clone)]
enum Series {
    Lines { x: Vec<f64>, y: Vec<f64>, style: PathStyle },
    Points { x: Vec<f64>, y: Vec<f64>, style: PointStyle },
}

/// Main visualizer struct
pub struct Visualizer {
    series: Vec<Series>,
    title: String,
    x_label: String,
    y_label: String,
    x_range: Option<(f64, f64)>,
    y_range: Option<(f64, f64)>,
    aspect_ratio: Option<f64>,
}

impl Visualizer {
    /// Create a new visualizer
    pub fn new() -> Self {
        Self {
            series: Vec::new(),
            title: String::new(),
            x_label: "X [m]".to_string(),
            y_label: "Y [m]".to_string(),
            x_range: None,
            y_range: None,
            aspect_ratio: Some(1.0),
        }
    }

    pub fn set_title(&mut self, title: &str) -> &mut Self {
        self.title = title.to_string();
        self
    }

    pub fn set_x_range(&mut self, min: f64, max: f64) -> &mut Self {
        self.x_range = Some((min, max));
        self
    }

    pub fn set_y_range(&mut self, min: f64, max: f64) -> &mut Self {
        self.y_range = Some((min, max));
        self
    }

    /// Set aspect ratio (None for auto)
    pub fn set_aspect_ratio(&mut self, ratio: Option<f64>) -> &mut Self {
        self.aspect_ratio = ratio;
        self
    }

    /// Number of collected series
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// Plot a polyline
    pub fn plot_path_xy(&mut self, x: &[f64], y: &[f64], style: &PathStyle) -> &mut Self {
        self.series.push(Series::Lines {
            x: x.to_vec(),
            y: y.to_vec(),
            style: style.clone(),
        });
        self
    }

    /// Plot points from x,y vectors
    pub fn plot_points_xy(&mut self, x: &[f64], y: &[f64], style: &PointStyle) -> &mut Self {
        self.series.push(Series::Points {
            x: x.to_vec(),
            y: y.to_vec(),
            style: style.clone(),
        });
        self
    }

    /// Plot the closed outline of a polygon
    pub fn plot_polygon(&mut self, polygon: &Polygon2D, style: &PathStyle) -> &mut Self {
        let (x, y) = polygon.exterior_xy();
        self.plot_path_xy(&x, &y, style)
    }

    /// Plot the grid cells and the outline of every object
    pub fn plot_map(&mut self, map: &OccupancyMap) -> &mut Self {
        let labelled = map
            .cells()
            .iter()
            .enumerate()
            .filter(|(_, priority)| **priority > ObjectKind::Unknown.priority())
            .map(|(index, &priority)| {
                // column-major storage
                let (row, col) = (index % map.num_rows(), index / map.num_rows());
                (ObjectKind::blocks(priority), map.cell_center(row, col))
            })
            .into_group_map();

        for (blocking, centers) in labelled.into_iter().sorted_by_key(|(blocking, _)| *blocking) {
            let (x, y): (Vec<f64>, Vec<f64>) = centers.iter().map(|p| (p.x, p.y)).unzip();
            let style = if blocking {
                PointStyle::new(colors::BLOCKED_CELL, "Blocked cells")
            } else {
                PointStyle::new(colors::MARKED_CELL, "Marked cells")
            };
            self.plot_points_xy(&x, &y, &style.with_symbol('S').with_size(0.5));
        }

        for object in map.objects() {
            let style = match object {
                MapObject::ParkedCar { .. } => PathStyle::new(colors::CAR, "Parked car"),
                MapObject::ParkingSpot { .. } => PathStyle::new(colors::PARKING_SPOT, "Parking spot"),
            };
            self.plot_polygon(object.footprint(), &style);
        }
        self
    }

    /// Plot the ego footprint at every `stride`-th node and at the last node
    pub fn plot_search_trace(&mut self, tree: &SearchTree, footprint: &Polygon2D, stride: usize) -> &mut Self {
        let stride = stride.max(1);
        let last = tree.len().saturating_sub(1);
        let style = PathStyle::new(colors::EGO, "").with_line_width(1.0);

        for (id, node) in tree.iter() {
            if id.0 % stride == 0 || id.0 == last {
                self.plot_polygon(&footprint.transformed(&node.state.pose()), &style);
            }
        }
        self
    }

    /// Plot the rear-axle trajectory of a solution
    pub fn plot_vehicle_path(&mut self, path: &[VehicleState]) -> &mut Self {
        let (x, y): (Vec<f64>, Vec<f64>) = path.iter().map(|s| (s.x, s.y)).unzip();
        self.plot_path_xy(&x, &y, &PathStyle::default())
    }

    /// Plot a pose with a heading indicator
    pub fn plot_pose(&mut self, pose: &RigidPose2D, caption: &str, color: &str) -> &mut Self {
        self.plot_points_xy(&[pose.x], &[pose.y], &PointStyle::new(color, caption).with_size(1.5));

        let arrow_len = 1.0;
        let end_x = pose.x + arrow_len * pose.yaw.cos();
        let end_y = pose.y + arrow_len * pose.yaw.sin();
        self.plot_path_xy(&[pose.x, end_x], &[pose.y, end_y], &PathStyle::new(color, ""))
    }

    fn build_figure(&self) -> Figure {
        let mut figure = Figure::new();
        let axes = figure.axes2d();

        for series in &self.series {
            match series {
                Series::Lines { x, y, style } => {
                    axes.lines(x, y, &[
                        Caption(&style.caption),
                        Color(&style.color),
                        LineWidth(style.line_width),
                    ]);
                }
                Series::Points { x, y, style } => {
                    axes.points(x, y, &[
                        Caption(&style.caption),
                        Color(&style.color),
                        PointSymbol(style.symbol),
                        PointSize(style.size),
                    ]);
                }
            }
        }

        if !self.title.is_empty() {
            axes.set_title(&self.title, &[]);
        }
        axes.set_x_label(&self.x_label, &[]);
        axes.set_y_label(&self.y_label, &[]);

        if let Some((min, max)) = self.x_range {
            axes.set_x_range(AutoOption::Fix(min), AutoOption::Fix(max));
        }
        if let Some((min, max)) = self.y_range {
            axes.set_y_range(AutoOption::Fix(min), AutoOption::Fix(max));
        }
        if let Some(ratio) = self.aspect_ratio {
            axes.set_aspect_ratio(AutoOption::Fix(ratio));
        }

        figure
    }

    /// Finalize and show the plot
    pub fn show(&self) -> Result<(), String> {
        let mut figure = self.build_figure();
        figure.show().map_err(|e| e.to_string()).map(|_| ())
    }

    /// Save plot to PNG file
    pub fn save_png(&self, path: &str, width: u32, height: u32) -> Result<(), String> {
        let mut figure = self.build_figure();
        figure.save_to_png(path, width, height).map_err(|e| e.to_string())
    }

    /// Save plot to SVG file
    pub fn save_svg(&self, path: &str) -> Result<(), String> {
        let mut figure = self.build_figure();
        figure.save_to_svg(path, 800, 600).map_err(|e| e.to_string())
    }
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematics::ControlInput;
    use crate::scenario::MapParameters;

    fn polygon(points: &[(f64, f64)]) -> Polygon2D {
        Polygon2D::from_xy(points).unwrap()
    }

    #[test]
    fn test_visualizer_creation() {
        let vis = Visualizer::new();
        assert!(vis.aspect_ratio.is_some());
        assert_eq!(vis.series_count(), 0);
    }

    #[test]
    fn test_path_style() {
        let style = PathStyle::new(colors::RED, "Test Path").with_line_width(3.0);
        assert_eq!(style.line_width, 3.0);
        assert_eq!(style.color, colors::RED);
    }

    #[test]
    fn test_plot_map_groups_cells() {
        let ego = polygon(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        let mut map = OccupancyMap::new(MapParameters::new(4, 4, 1.0).unwrap(), ego);
        map.stamp(MapObject::parking_spot(polygon(&[(0.0, 0.0), (0.0, 4.0), (2.0, 4.0), (2.0, 0.0)])));
        map.stamp(MapObject::parked_car(polygon(&[(2.0, 0.0), (2.0, 2.0), (4.0, 2.0), (4.0, 0.0)])));

        let mut vis = Visualizer::new();
        vis.plot_map(&map);
        // marked cells, blocked cells, two outlines
        assert_eq!(vis.series_count(), 4);
    }

    #[test]
    fn test_plot_search_trace_stride() {
        let mut tree = SearchTree::new();
        let mut id = tree.add_root(VehicleState::default());
        for i in 1..25 {
            id = tree.add_child(id, VehicleState::new(i as f64, 0.0, 0.0), ControlInput::forward(1.0));
        }
        let footprint = polygon(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);

        let mut vis = Visualizer::new();
        vis.plot_search_trace(&tree, &footprint, 10);
        // nodes 0, 10, 20 and the last one (24)
        assert_eq!(vis.series_count(), 4);
    }
}
