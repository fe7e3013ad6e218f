//! Wire encoding of trees, ranks and spec state.
//!
//! The remote UI consumes flat delimited strings with five nesting levels of
//! private ASCII punctuation; none of the delimiters can occur inside the
//! encoded values (non-negative integers and pre-validated identifier
//! strings only). Field and group boundaries are tracked explicitly by
//! [`Joiner`] so the grammar is testable without any message dispatch.
//!
//! Iteration order everywhere follows the graph arena's declared order,
//! which keeps every payload reproducible byte-for-byte.

use std::fmt::{self, Write as _};

use crate::budget::PointSnapshot;
use crate::graph::{Talent, TalentTab};
use crate::state::CharacterSpec;
use crate::types::{CharacterPointType, NodeKind, TabId};

/// Writes a separator-joined group into a buffer: no separator before the
/// first item, one before every later item, nothing trailing.
struct Joiner<'a> {
    buf: &'a mut String,
    sep: char,
    first: bool,
}

impl<'a> Joiner<'a> {
    fn new(buf: &'a mut String, sep: char) -> Self {
        Self {
            buf,
            sep,
            first: true,
        }
    }

    fn entry(&mut self, value: impl fmt::Display) {
        if !self.first {
            self.buf.push(self.sep);
        }
        self.first = false;
        let _ = write!(self.buf, "{value}");
    }
}

/// Tree layout payload for one tab:
/// `id^name^iconId^background^description^role^spellString^talentType^tabIndex^`
/// followed by the `*`-joined talent list. An empty tab encodes as the
/// header alone.
pub fn encode_tab_layout(tab: &TalentTab) -> String {
    let mut buf = String::new();
    let _ = write!(
        buf,
        "{}^{}^{}^{}^{}^{}^{}^{}^{}^",
        tab.id,
        tab.name,
        tab.icon,
        tab.background,
        tab.description,
        tab.role,
        tab.spell_string,
        tab.point_type.wire_id(),
        tab.tab_index,
    );

    let mut first = true;
    for talent in tab.talents() {
        if !first {
            buf.push('*');
        }
        first = false;
        encode_talent(&mut buf, tab.id, talent);
    }

    buf
}

fn encode_talent(buf: &mut String, tab_id: TabId, talent: &Talent) {
    let _ = write!(
        buf,
        "{}&{}&{}&{}&{}&{}&{}&{}&{}&",
        tab_id,
        talent.spell_id,
        talent.column,
        talent.row,
        talent.rank_cost,
        talent.required_level,
        talent.tab_point_req,
        talent.number_of_ranks,
        talent.prereq_policy.wire_id(),
    );

    let mut prereqs = Joiner::new(buf, '@');
    for edge in &talent.prereqs {
        prereqs.entry(format_args!(
            "{}${}${}",
            edge.talent, edge.tab, edge.required_rank
        ));
    }
    buf.push('&');

    let mut ranks = Joiner::new(buf, '%');
    for (rank, spell) in &talent.ranks {
        ranks.entry(format_args!("{rank}~{spell}"));
    }
    buf.push('&');

    let mut unlearns = Joiner::new(buf, '`');
    for spell in &talent.unlearn_spells {
        unlearns.entry(spell);
    }

    let _ = write!(buf, "&{}&", talent.node_kind.wire_id());

    let mut choices = Joiner::new(buf, '!');
    for choice in &talent.choices {
        choices.entry(choice.spell_id);
    }
}

/// Per-tab rank snapshot:
/// `tabId^category^` then `*`-joined `spellId~rankOrChoiceId` entries in
/// graph talent order, zero when not learned. A learned choice node encodes
/// the chosen alternative's spell id instead of the raw rank counter.
pub fn encode_ranks(tab: &TalentTab, spec: Option<&CharacterSpec>) -> String {
    let mut buf = String::new();
    let _ = write!(buf, "{}^{}^", tab.id, tab.point_type.wire_id());

    let mut entries = Joiner::new(&mut buf, '*');
    for talent in tab.talents() {
        let record = spec.and_then(|spec| spec.talent(tab.id, talent.spell_id));
        match record {
            Some(record) if record.current_rank > 0 => match record.node_kind {
                NodeKind::Choice => {
                    let chosen = spec
                        .and_then(|spec| spec.choices.get(&record.spell_id))
                        .copied()
                        .map(|spell| spell.0)
                        .unwrap_or(0);
                    entries.entry(format_args!("{}~{}", record.spell_id, chosen));
                }
                NodeKind::Rank => {
                    entries.entry(format_args!(
                        "{}~{}",
                        record.spell_id, record.current_rank
                    ));
                }
            },
            _ => entries.entry(format_args!("{}~0", talent.spell_id)),
        }
    }

    buf
}

/// Spec state payload:
/// `id^name^description^active^iconId^visibility^ownerTabId^` then
/// `%`-joined `tabId~amount` spend entries, `^`, then `@`-joined
/// `category$available$granted$maxPerTab$hardCap` budget entries.
pub fn encode_spec(
    spec: &CharacterSpec,
    budgets: &[(CharacterPointType, PointSnapshot)],
) -> String {
    let mut buf = String::new();
    let _ = write!(
        buf,
        "{}^{}^{}^{}^{}^{}^{}^",
        spec.id,
        spec.name,
        spec.description,
        spec.active as u8,
        spec.icon,
        spec.visibility,
        spec.owner_tab,
    );

    let mut spent = Joiner::new(&mut buf, '%');
    for (tab, amount) in &spec.points_spent {
        spent.entry(format_args!("{tab}~{amount}"));
    }
    buf.push('^');

    let mut categories = Joiner::new(&mut buf, '@');
    for (point_type, snapshot) in budgets {
        categories.entry(format_args!(
            "{}${}${}${}${}",
            point_type.wire_id(),
            snapshot.available,
            snapshot.granted,
            snapshot.max_per_tab,
            snapshot.hard_cap,
        ));
    }

    buf
}
