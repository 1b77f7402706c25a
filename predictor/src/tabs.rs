use std::{collections::BTreeMap, fmt, sync::Arc};

/// The four fixed tabs of the panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TabId {
    #[default]
    Tab1,
    Tab2,
    Tab3,
    Tab4,
}

/// Tabs in display order.
pub const TAB_IDS: [TabId; 4] = [TabId::Tab1, TabId::Tab2, TabId::Tab3, TabId::Tab4];

impl TabId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tab1 => "tab1",
            Self::Tab2 => "tab2",
            Self::Tab3 => "tab3",
            Self::Tab4 => "tab4",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Tab1 => "Tab 1",
            Self::Tab2 => "Tab 2",
            Self::Tab3 => "Tab 3",
            Self::Tab4 => "Tab 4",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    /// The tab to the right, wrapping around.
    pub fn next(self) -> Self {
        TAB_IDS[(self.index() + 1) % TAB_IDS.len()]
    }

    /// The tab to the left, wrapping around.
    pub fn prev(self) -> Self {
        TAB_IDS[(self.index() + TAB_IDS.len() - 1) % TAB_IDS.len()]
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bearing parameters a tab can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParamKey {
    DI,
    Omega,
    Ka,
}

pub const PARAM_KEYS: [ParamKey; 3] = [ParamKey::DI, ParamKey::Omega, ParamKey::Ka];

impl ParamKey {
    pub fn label(self) -> &'static str {
        match self {
            Self::DI => "D_i",
            Self::Omega => "Omega",
            Self::Ka => "K_a",
        }
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-tab state kept across tab switches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabContext {
    pub input_value: String,
    pub selected_params: Vec<ParamKey>,
    pub param_values: BTreeMap<ParamKey, String>,
}

impl TabContext {
    pub fn is_selected(&self, key: ParamKey) -> bool {
        self.selected_params.contains(&key)
    }

    /// Value typed for `key`, empty if none.
    pub fn param_value(&self, key: ParamKey) -> &str {
        self.param_values.get(&key).map_or("", String::as_str)
    }
}

/// One context per tab.
///
/// Contexts are shared between machine states; a transition only allocates the context it changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabContexts {
    pub tab1: Arc<TabContext>,
    pub tab2: Arc<TabContext>,
    pub tab3: Arc<TabContext>,
    pub tab4: Arc<TabContext>,
}

impl TabContexts {
    pub fn get(&self, id: TabId) -> &Arc<TabContext> {
        match id {
            TabId::Tab1 => &self.tab1,
            TabId::Tab2 => &self.tab2,
            TabId::Tab3 => &self.tab3,
            TabId::Tab4 => &self.tab4,
        }
    }

    fn slot_mut(&mut self, id: TabId) -> &mut Arc<TabContext> {
        match id {
            TabId::Tab1 => &mut self.tab1,
            TabId::Tab2 => &mut self.tab2,
            TabId::Tab3 => &mut self.tab3,
            TabId::Tab4 => &mut self.tab4,
        }
    }
}

/// Events accepted by [`TabMachine::transition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabEvent {
    SwitchTab(TabId),
    UpdateContext { tab: TabId, input_value: String },
    UpdateParamSelection { tab: TabId, keys: Vec<ParamKey> },
    UpdateParamValue { tab: TabId, key: ParamKey, value: String },
}

/// Active tab plus the context of every tab.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabMachine {
    active: TabId,
    contexts: TabContexts,
}

impl TabMachine {
    /// Initial state: first tab active, every context empty.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> TabId {
        self.active
    }

    pub fn context(&self, id: TabId) -> &TabContext {
        self.contexts.get(id)
    }

    pub fn current_context(&self) -> &TabContext {
        self.context(self.active)
    }

    pub fn contexts(&self) -> &TabContexts {
        &self.contexts
    }

    /// Computes the state following `event`. `self` is left untouched.
    pub fn transition(&self, event: TabEvent) -> Self {
        let mut next = self.clone();
        match event {
            TabEvent::SwitchTab(id) => next.active = id,
            TabEvent::UpdateContext { tab, input_value } => {
                next.replace(tab, |ctx| ctx.input_value = input_value);
            }
            TabEvent::UpdateParamSelection { tab, keys } => {
                next.replace(tab, |ctx| ctx.selected_params = keys);
            }
            TabEvent::UpdateParamValue { tab, key, value } => {
                next.replace(tab, |ctx| {
                    ctx.param_values.insert(key, value);
                });
            }
        }
        next
    }

    fn replace(&mut self, tab: TabId, update: impl FnOnce(&mut TabContext)) {
        let slot = self.contexts.slot_mut(tab);
        let mut ctx = TabContext::clone(slot);
        update(&mut ctx);
        *slot = Arc::new(ctx);
    }
}

/// Returns `selection` with `key` removed if present, appended otherwise.
pub fn toggle_param(selection: &[ParamKey], key: ParamKey) -> Vec<ParamKey> {
    if selection.contains(&key) {
        selection.iter().copied().filter(|k| *k != key).collect()
    } else {
        selection.iter().copied().chain(std::iter::once(key)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_first_tab_with_empty_contexts() {
        let machine = TabMachine::new();
        assert_eq!(machine.active(), TabId::Tab1);
        for id in TAB_IDS {
            assert_eq!(machine.context(id), &TabContext::default());
        }
    }

    #[test]
    fn switch_then_update_keeps_other_tabs() {
        let initial = TabMachine::new().transition(TabEvent::UpdateContext {
            tab: TabId::Tab1,
            input_value: "first".into(),
        });

        let switched = initial.transition(TabEvent::SwitchTab(TabId::Tab3));
        let updated = switched.transition(TabEvent::UpdateContext {
            tab: TabId::Tab3,
            input_value: "x".into(),
        });

        assert_eq!(updated.active(), TabId::Tab3);
        assert_eq!(updated.context(TabId::Tab3).input_value, "x");
        assert_eq!(updated.context(TabId::Tab1).input_value, "first");
        assert_eq!(updated.current_context().input_value, "x");
        // Earlier states are untouched.
        assert_eq!(switched.context(TabId::Tab3).input_value, "");
        assert_eq!(initial.active(), TabId::Tab1);
    }

    #[test]
    fn transitions_share_untouched_contexts() {
        let before = TabMachine::new();
        let after = before.transition(TabEvent::UpdateParamValue {
            tab: TabId::Tab2,
            key: ParamKey::Omega,
            value: "10000".into(),
        });

        assert!(Arc::ptr_eq(&before.contexts().tab1, &after.contexts().tab1));
        assert!(Arc::ptr_eq(&before.contexts().tab4, &after.contexts().tab4));
        assert!(!Arc::ptr_eq(&before.contexts().tab2, &after.contexts().tab2));
        assert_eq!(after.context(TabId::Tab2).param_value(ParamKey::Omega), "10000");
        assert_eq!(after.context(TabId::Tab2).param_value(ParamKey::DI), "");
    }

    #[test]
    fn update_param_selection_replaces_only_selection() {
        let machine = TabMachine::new()
            .transition(TabEvent::UpdateContext {
                tab: TabId::Tab4,
                input_value: "keep".into(),
            })
            .transition(TabEvent::UpdateParamSelection {
                tab: TabId::Tab4,
                keys: vec![ParamKey::Ka, ParamKey::DI],
            });

        let ctx = machine.context(TabId::Tab4);
        assert_eq!(ctx.input_value, "keep");
        assert!(ctx.is_selected(ParamKey::Ka));
        assert!(!ctx.is_selected(ParamKey::Omega));
        assert_eq!(machine.active(), TabId::Tab1);
    }

    #[test]
    fn toggle_adds_and_removes() {
        let sel = toggle_param(&[], ParamKey::Omega);
        assert_eq!(sel, vec![ParamKey::Omega]);
        let sel = toggle_param(&sel, ParamKey::DI);
        assert_eq!(sel, vec![ParamKey::Omega, ParamKey::DI]);
        let sel = toggle_param(&sel, ParamKey::Omega);
        assert_eq!(sel, vec![ParamKey::DI]);
    }

    #[test]
    fn tab_navigation_wraps() {
        assert_eq!(TabId::Tab4.next(), TabId::Tab1);
        assert_eq!(TabId::Tab1.prev(), TabId::Tab4);
        assert_eq!(TabId::Tab2.next(), TabId::Tab3);
        assert_eq!(TabId::Tab3.to_string(), "tab3");
    }
}
