//! Y-domain merger: per-group domain computation with stacking, percent
//! normalization, custom bounds and global-group synchronization.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::extent::{ExtentPolicy, compute_continuous_extent, merge_bounds};
use crate::core::series::{SeriesData, collect_stacks};
use crate::core::spec::{DomainRange, SeriesSpec};
use crate::core::types::{DEFAULT_GROUP_ID, GroupId, ScaleType, SpecId};
use crate::error::ChartResult;

/// Merged Y domain for one group of series sharing an axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YDomain {
    pub group_id: GroupId,
    pub scale_type: ScaleType,
    pub min: f64,
    pub max: f64,
}

/// Series specs of one group, partitioned by stacking.
#[derive(Debug, Clone, Default)]
pub struct GroupSpecs<'a> {
    pub stacked: Vec<&'a SeriesSpec>,
    pub non_stacked: Vec<&'a SeriesSpec>,
}

impl GroupSpecs<'_> {
    fn all(&self) -> impl Iterator<Item = &&SeriesSpec> {
        self.stacked.iter().chain(self.non_stacked.iter())
    }
}

/// Partitions series specs by group id, preserving declaration order.
#[must_use]
pub fn split_specs_by_group_id(specs: &[SeriesSpec]) -> IndexMap<GroupId, GroupSpecs<'_>> {
    let mut groups: IndexMap<GroupId, GroupSpecs<'_>> = IndexMap::new();
    for spec in specs {
        let entry = groups.entry(spec.group_id.clone()).or_default();
        if spec.is_stacked() {
            entry.stacked.push(spec);
        } else {
            entry.non_stacked.push(spec);
        }
    }
    groups
}

/// Keeps the single declared Y scale type, or coerces to linear when the
/// contributing series disagree. Defaults to linear for an empty set.
#[must_use]
pub fn coerce_y_scale_types<'a>(specs: impl IntoIterator<Item = &'a SeriesSpec>) -> ScaleType {
    let mut iter = specs.into_iter();
    let Some(first) = iter.next() else {
        return ScaleType::Linear;
    };
    let first_type = first.y_scale_type;
    if iter.all(|s| s.y_scale_type == first_type) {
        first_type
    } else {
        ScaleType::Linear
    }
}

/// Computes one merged Y domain per group.
///
/// Custom bound overrides are validated bound by bound and raise a
/// group-labeled error on violation. After the per-group pass, every group
/// flagged `use_default_group_domain` (and the global group itself) is
/// overwritten with the union extent of all such groups.
pub fn merge_y_domains(
    data: &IndexMap<SpecId, SeriesData>,
    specs: &[SeriesSpec],
    custom_by_group: &IndexMap<GroupId, DomainRange>,
) -> ChartResult<Vec<YDomain>> {
    let groups = split_specs_by_group_id(specs);
    let mut domains = Vec::with_capacity(groups.len());

    for (group_id, group_specs) in &groups {
        let scale_type = coerce_y_scale_types(group_specs.all().copied());
        let [min, max] = merge_group_domain(data, group_specs, group_id, custom_by_group)?;
        domains.push(YDomain {
            group_id: group_id.clone(),
            scale_type,
            min,
            max,
        });
    }

    synchronize_global_groups(specs, &mut domains);
    Ok(domains)
}

fn merge_group_domain(
    data: &IndexMap<SpecId, SeriesData>,
    group_specs: &GroupSpecs<'_>,
    group_id: &str,
    custom_by_group: &IndexMap<GroupId, DomainRange>,
) -> ChartResult<[f64; 2]> {
    let computed = if group_specs.stacked.iter().any(|s| s.stack_as_percentage) {
        // Percent-normalized stacks always fill the same vertical range.
        [0.0, 1.0]
    } else {
        let fit = group_specs.all().any(|s| s.fit_to_extent);
        let policy = if fit {
            ExtentPolicy::Fit
        } else {
            ExtentPolicy::ZeroAnchored
        };

        let stacked = stacked_domain(data, &group_specs.stacked, policy);
        let non_stacked = non_stacked_domain(data, &group_specs.non_stacked, policy);
        merge_extents(stacked, non_stacked)
    };

    match custom_by_group.get(group_id) {
        Some(range) => merge_bounds(
            computed,
            range.min,
            range.max,
            &format!("yDomain for group {group_id}"),
        ),
        None => Ok(computed),
    }
}

/// Stacked domain: for every X the extent considers each individual
/// contribution and, whenever more than one series contributes, the running
/// sum, so the domain accommodates the tallest rendered stack.
fn stacked_domain(
    data: &IndexMap<SpecId, SeriesData>,
    specs: &[&SeriesSpec],
    policy: ExtentPolicy,
) -> Option<[f64; 2]> {
    if specs.is_empty() {
        return None;
    }
    let datasets: Vec<&SeriesData> = specs.iter().filter_map(|s| data.get(&s.id)).collect();
    let stacks = collect_stacks(&datasets);
    if stacks.is_empty() {
        return None;
    }

    let mut values: Vec<f64> = Vec::new();
    for stack in stacks.values() {
        values.extend(stack.iter().copied());
        if stack.len() > 1 {
            values.push(stack.iter().sum());
        }
    }
    Some(compute_continuous_extent(values, policy))
}

fn non_stacked_domain(
    data: &IndexMap<SpecId, SeriesData>,
    specs: &[&SeriesSpec],
    policy: ExtentPolicy,
) -> Option<[f64; 2]> {
    if specs.is_empty() {
        return None;
    }
    let mut values: Vec<f64> = Vec::new();
    for spec in specs {
        let Some(series) = data.get(&spec.id) else {
            continue;
        };
        for datum in &series.data {
            if let Some(y) = datum.y {
                values.push(y);
            }
            if let Some(y0) = datum.y0 {
                values.push(y0);
            }
        }
    }
    if values.is_empty() {
        return None;
    }
    Some(compute_continuous_extent(values, policy))
}

fn merge_extents(a: Option<[f64; 2]>, b: Option<[f64; 2]>) -> [f64; 2] {
    match (a, b) {
        (Some(a), Some(b)) => [a[0].min(b[0]), a[1].max(b[1])],
        (Some(a), None) => a,
        (None, Some(b)) => b,
        (None, None) => [0.0, 0.0],
    }
}

/// Overwrites the domain of the global group and of every group flagged
/// `use_default_group_domain` with their union extent, so all globally
/// synchronized Y axes share identical bounds.
fn synchronize_global_groups(specs: &[SeriesSpec], domains: &mut [YDomain]) {
    let opted_in: Vec<GroupId> = domains
        .iter()
        .filter(|d| {
            d.group_id == DEFAULT_GROUP_ID
                || specs
                    .iter()
                    .any(|s| s.group_id == d.group_id && s.use_default_group_domain)
        })
        .map(|d| d.group_id.clone())
        .collect();

    if opted_in.len() < 2 {
        return;
    }

    let mut union = [f64::INFINITY, f64::NEG_INFINITY];
    for domain in domains.iter() {
        if opted_in.contains(&domain.group_id) {
            union[0] = union[0].min(domain.min);
            union[1] = union[1].max(domain.max);
        }
    }

    for domain in domains.iter_mut() {
        if opted_in.contains(&domain.group_id) {
            domain.min = union[0];
            domain.max = union[1];
        }
    }
}
