//! Transit agency list: header, one row per agency, create actions
//!
//! The view is a pure projection of [`AgencyListProps`]. Clicks come back as
//! an [`AgencyListAction`] and are applied with [`apply_action`] against the
//! injected [`TransitContext`].

use crate::constants::{DEFAULT_OBJECT_COLOR, PREF_AGENCY_DEFAULT_COLOR, PREF_LINE_DEFAULT_COLOR};
use crate::i18n::Translate;
use crate::preferences::Preferences;
use crate::theme;
use crate::transit::{
    Agency, AgencyAttributes, AgencyCollection, CollectionManager, Line, LineAttributes,
    LineCollection, ObjectId, SelectedObjects, TransitObject,
};
use crate::ui::components::{agency_row, AgencyRowProps};
use eframe::egui;
use tracing::{debug, info};

pub struct AgencyListProps<'a> {
    pub agency_collection: Option<&'a AgencyCollection>,
    /// Only used for the per-row line count
    pub line_collection: Option<&'a LineCollection>,
    pub selected_agency: Option<&'a Agency>,
    pub selected_line: Option<&'a Line>,
}

impl<'a> AgencyListProps<'a> {
    pub fn object_selected(&self) -> bool {
        self.selected_agency.is_some() || self.selected_line.is_some()
    }

    pub fn show_new_agency(&self) -> bool {
        !self.object_selected() && self.agency_collection.is_some()
    }

    /// A line needs at least one agency to belong to
    pub fn show_new_line(&self) -> bool {
        !self.object_selected() && self.agency_collection.is_some_and(|c| c.size() > 0)
    }

    /// Row props in collection order, each carrying the full selection
    pub fn rows(&self) -> Vec<AgencyRowProps<'a>> {
        let Some(collection) = self.agency_collection else {
            return Vec::new();
        };
        collection
            .features()
            .iter()
            .map(|agency| AgencyRowProps {
                agency,
                line_count: self
                    .line_collection
                    .map_or(0, |lines| lines.count_for_agency(agency.id())),
                selected_agency: self.selected_agency,
                selected_line: self.selected_line,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgencyListAction {
    NewAgency,
    NewLine,
    EditAgency(ObjectId),
}

/// Services the list actions write to
pub struct TransitContext<'a> {
    pub preferences: &'a Preferences,
    pub collections: &'a mut CollectionManager,
    pub selection: &'a mut SelectedObjects,
}

pub fn agency_list_view(
    ui: &mut egui::Ui,
    props: &AgencyListProps<'_>,
    t: &dyn Translate,
    icon: Option<&egui::TextureHandle>,
) -> Option<AgencyListAction> {
    let mut action = None;
    let title = t.t("transit:transitAgency:List");

    ui.horizontal(|ui| {
        if let Some(icon) = icon {
            ui.add(
                egui::Image::new(icon)
                    .fit_to_exact_size(egui::vec2(theme::HEADER_ICON_SIZE, theme::HEADER_ICON_SIZE)),
            )
            .on_hover_text(title.as_str());
        }
        ui.add(
            egui::Label::new(
                egui::RichText::new(&title)
                    .size(theme::FONT_HEADING)
                    .strong()
                    .color(theme::TEXT_PRIMARY),
            )
            .selectable(false),
        );
    });
    ui.add_space(theme::SPACING_SM);

    let lines_label = t.t("transit:transitLine:Lines");
    ui.vertical(|ui| {
        ui.spacing_mut().item_spacing.y = theme::SPACING_XS;
        for row in props.rows() {
            let response = agency_row(ui, &row, &lines_label);
            if response.clicked() && !props.object_selected() {
                action = Some(AgencyListAction::EditAgency(row.agency.id()));
            }
        }
    });

    if props.show_new_agency() {
        ui.add_space(theme::SPACING_MD);
        let label = format!("{}  {}", egui_phosphor::regular::PLUS, t.t("transit:transitAgency:New"));
        if ui.add(theme::button_blue(label)).clicked() {
            action = Some(AgencyListAction::NewAgency);
        }
    }

    if props.show_new_line() {
        ui.add_space(theme::SPACING_SM);
        let label = format!("{}  {}", egui_phosphor::regular::PLUS, t.t("transit:transitLine:New"));
        if ui.add(theme::button_blue(label)).clicked() {
            action = Some(AgencyListAction::NewLine);
        }
    }

    action
}

pub fn apply_action(action: AgencyListAction, ctx: TransitContext<'_>) {
    match action {
        AgencyListAction::NewAgency => new_agency(ctx),
        AgencyListAction::NewLine => new_line(ctx),
        AgencyListAction::EditAgency(id) => edit_agency(ctx, id),
    }
}

/// Create an unsaved agency in the default color and select it for editing
pub fn new_agency(ctx: TransitContext<'_>) {
    let color = ctx
        .preferences
        .get(PREF_AGENCY_DEFAULT_COLOR, DEFAULT_OBJECT_COLOR.to_string());
    let mut agency = Agency::new(AgencyAttributes::with_color(color), true, ctx.collections);
    agency.start_editing();
    info!(id = agency.id(), color = %agency.color(), "New agency");
    ctx.selection.select(agency);
}

/// Create an unsaved line in the default color and select it for editing
pub fn new_line(ctx: TransitContext<'_>) {
    let color = ctx
        .preferences
        .get(PREF_LINE_DEFAULT_COLOR, DEFAULT_OBJECT_COLOR.to_string());
    let mut line = Line::new(LineAttributes::with_color(color), true, ctx.collections);
    line.start_editing();
    info!(id = line.id(), color = %line.color(), "New line");
    ctx.selection.select(line);
}

/// Select a saved agency for editing; unknown ids are ignored
pub fn edit_agency(ctx: TransitContext<'_>, id: ObjectId) {
    match ctx.collections.agencies().get(id).cloned() {
        Some(mut agency) => {
            agency.start_editing();
            ctx.selection.select(agency);
        }
        None => debug!(id, "Agency to edit not found"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::headless;
    use serde_json::json;

    struct Keys;

    impl Translate for Keys {
        fn t(&self, key: &str) -> String {
            key.to_string()
        }
    }

    fn manager_with_agencies(count: usize) -> CollectionManager {
        let mut manager = CollectionManager::default();
        for _ in 0..count {
            let agency = Agency::new(AgencyAttributes::with_color("#123456"), true, &mut manager);
            manager.save_agency(agency);
        }
        manager
    }

    fn props<'a>(
        agencies: Option<&'a AgencyCollection>,
        selected_agency: Option<&'a Agency>,
        selected_line: Option<&'a Line>,
    ) -> AgencyListProps<'a> {
        AgencyListProps {
            agency_collection: agencies,
            line_collection: None,
            selected_agency,
            selected_line,
        }
    }

    #[test]
    fn new_agency_shown_for_empty_collection() {
        let manager = manager_with_agencies(0);
        let p = props(Some(manager.agencies()), None, None);
        assert!(p.show_new_agency());
        assert!(!p.show_new_line());
    }

    #[test]
    fn no_actions_without_collection() {
        let p = props(None, None, None);
        assert!(!p.show_new_agency());
        assert!(!p.show_new_line());
        assert!(p.rows().is_empty());
    }

    #[test]
    fn visibility_matches_selection_and_size() {
        let mut scratch = CollectionManager::default();
        let agency = Agency::new(AgencyAttributes::default(), true, &mut scratch);
        let line = Line::new(LineAttributes::default(), true, &mut scratch);

        for size in [0, 1, 3] {
            let manager = manager_with_agencies(size);
            for collection in [None, Some(manager.agencies())] {
                for (sel_agency, sel_line) in [
                    (None, None),
                    (Some(&agency), None),
                    (None, Some(&line)),
                    (Some(&agency), Some(&line)),
                ] {
                    let p = props(collection, sel_agency, sel_line);
                    let none_selected = sel_agency.is_none() && sel_line.is_none();
                    assert_eq!(p.show_new_agency(), none_selected && collection.is_some());
                    assert_eq!(
                        p.show_new_line(),
                        none_selected && collection.is_some() && size > 0
                    );
                }
            }
        }
    }

    #[test]
    fn two_agencies_then_select_one() {
        let manager = manager_with_agencies(2);
        let p = props(Some(manager.agencies()), None, None);
        assert!(p.show_new_agency());
        assert!(p.show_new_line());
        assert_eq!(p.rows().len(), 2);

        let selected = manager.agencies().features()[0].clone();
        let p = props(Some(manager.agencies()), Some(&selected), None);
        assert!(!p.show_new_agency());
        assert!(!p.show_new_line());
        let rows = p.rows();
        assert_eq!(rows.len(), 2);
        for row in &rows {
            assert_eq!(row.selected_agency.map(|a| a.id()), Some(selected.id()));
        }
        assert!(rows[0].is_active());
        assert!(!rows[1].is_active());
    }

    #[test]
    fn rows_follow_collection_order_and_count_lines() {
        let mut manager = manager_with_agencies(2);
        let second_id = manager.agencies().features()[1].id();
        let line = Line::new(
            LineAttributes {
                agency_id: Some(second_id),
                ..Default::default()
            },
            true,
            &mut manager,
        );
        manager.save_line(line);

        let p = AgencyListProps {
            agency_collection: Some(manager.agencies()),
            line_collection: Some(manager.lines()),
            selected_agency: None,
            selected_line: None,
        };
        let counts: Vec<_> = p.rows().iter().map(|r| (r.agency.id(), r.line_count)).collect();
        let first_id = manager.agencies().features()[0].id();
        assert_eq!(counts, vec![(first_id, 0), (second_id, 1)]);
    }

    #[test]
    fn new_agency_uses_configured_color_and_selects_it() {
        let mut prefs = Preferences::default();
        prefs.set(PREF_AGENCY_DEFAULT_COLOR, json!("#ff8800")).unwrap();
        let mut collections = CollectionManager::default();
        let mut selection = SelectedObjects::default();

        new_agency(TransitContext {
            preferences: &prefs,
            collections: &mut collections,
            selection: &mut selection,
        });

        let agency = selection.selected_agency().expect("agency selected");
        assert_eq!(agency.color(), "#ff8800");
        assert!(agency.is_new());
        assert!(agency.is_editing());
        assert!(selection.selected_line().is_none());
        // Unsaved: not in the collection yet
        assert_eq!(collections.agencies().size(), 0);
    }

    #[test]
    fn new_line_falls_back_to_default_color() {
        let prefs = Preferences::from_user_values(json!({
            "transit": { "lines": { "defaultColor": null } }
        }))
        .unwrap();
        let mut collections = CollectionManager::default();
        let mut selection = SelectedObjects::default();

        apply_action(
            AgencyListAction::NewLine,
            TransitContext {
                preferences: &prefs,
                collections: &mut collections,
                selection: &mut selection,
            },
        );

        let line = selection.selected_line().expect("line selected");
        assert_eq!(line.color(), DEFAULT_OBJECT_COLOR);
        assert!(line.is_editing());
        assert!(selection.selected_agency().is_none());
    }

    #[test]
    fn edit_agency_selects_a_copy_in_edit_mode() {
        let prefs = Preferences::default();
        let mut collections = manager_with_agencies(1);
        let id = collections.agencies().features()[0].id();
        let mut selection = SelectedObjects::default();

        apply_action(
            AgencyListAction::EditAgency(id),
            TransitContext {
                preferences: &prefs,
                collections: &mut collections,
                selection: &mut selection,
            },
        );
        assert!(selection.selected_agency().is_some_and(|a| a.id() == id && a.is_editing()));

        let mut selection = SelectedObjects::default();
        edit_agency(
            TransitContext {
                preferences: &prefs,
                collections: &mut collections,
                selection: &mut selection,
            },
            9999,
        );
        assert!(selection.is_empty());
    }

    #[test]
    fn headless_render_is_stable() {
        let manager = manager_with_agencies(2);
        let p = props(Some(manager.agencies()), None, None);
        let ctx = egui::Context::default();
        for _ in 0..2 {
            let mut action = None;
            let _ = ctx.run(egui::RawInput::default(), |ctx| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    action = agency_list_view(ui, &p, &Keys, None);
                });
            });
            assert_eq!(action, None);
        }
    }

    #[test]
    fn clicking_new_agency_creates_and_selects_it() {
        let prefs = Preferences::default();
        let mut collections = CollectionManager::default();
        let mut selection = SelectedObjects::default();
        let ctx = egui::Context::default();

        let action = {
            let p = props(Some(collections.agencies()), None, None);
            let draw = |ui: &mut egui::Ui| agency_list_view(ui, &p, &Keys, None);
            let (rect, idle) = headless::frame(&ctx, Vec::new(), draw);
            assert_eq!(idle, None);
            // Empty collection: "New Agency" is the last widget
            let target = egui::pos2(rect.min.x + 10.0, rect.max.y - theme::BUTTON_HEIGHT / 2.0);
            headless::click(&ctx, target, draw)
        };
        assert_eq!(action, Some(AgencyListAction::NewAgency));

        apply_action(
            AgencyListAction::NewAgency,
            TransitContext {
                preferences: &prefs,
                collections: &mut collections,
                selection: &mut selection,
            },
        );
        let agency = selection.selected_agency().expect("agency selected");
        assert_eq!(agency.color(), DEFAULT_OBJECT_COLOR);
        assert!(agency.is_editing());
    }
}
