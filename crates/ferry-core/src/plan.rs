//! Turning a request into engine jobs: partitioning, per-group filters and destinations.

use std::collections::HashMap;

use serde_json::Value;

use crate::model::{
    DeleteJob, DeleteRequest, INCLUDE_RULE_KEY, JobSpec, MoveJob, OptionMap, SourceGroup,
    TransferRequest,
};
use crate::path::{base_name, is_dir_like, join_segment, split_parent};

/// A group together with the job that will be submitted for it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedJob {
    /// Position in plan order; results are reported in this order.
    pub position: usize,
    /// Group the job was derived from.
    pub group: SourceGroup,
    /// Resolved destination, empty for deletes.
    pub destination: String,
    /// Engine payload.
    pub spec: JobSpec,
}

impl PlannedJob {
    /// Failure label for the job's group.
    #[must_use]
    pub fn label(&self) -> String {
        self.group.label()
    }
}

/// Split sources into file groups (by first-seen parent) followed by directory groups
/// (in source order).
#[must_use]
pub fn partition(sources: &[String]) -> Vec<SourceGroup> {
    let mut file_groups: Vec<(String, Vec<String>)> = Vec::new();
    let mut by_parent: HashMap<String, usize> = HashMap::new();
    let mut directories = Vec::new();

    for source in sources {
        if is_dir_like(source) {
            directories.push(SourceGroup::Directory {
                path: source.clone(),
            });
            continue;
        }
        let (parent, name) = split_parent(source);
        if let Some(&index) = by_parent.get(parent) {
            file_groups[index].1.push(name.to_string());
        } else {
            by_parent.insert(parent.to_string(), file_groups.len());
            file_groups.push((parent.to_string(), vec![name.to_string()]));
        }
    }

    file_groups
        .into_iter()
        .map(|(parent, names)| SourceGroup::Files { parent, names })
        .chain(directories)
        .collect()
}

/// Filter for one group: file groups add an include rule listing their names.
#[must_use]
pub fn group_filter(base: &OptionMap, group: &SourceGroup) -> OptionMap {
    let mut filter = base.clone();
    if let SourceGroup::Files { names, .. } = group {
        let rule = names.iter().cloned().map(Value::String).collect();
        filter.insert(INCLUDE_RULE_KEY.to_string(), Value::Array(rule));
    }
    filter
}

/// Destination for one group, keyed on the number of sources in the original request.
#[must_use]
pub fn resolve_destination(destination: &str, group: &SourceGroup, source_count: usize) -> String {
    match group {
        SourceGroup::Directory { path } if source_count > 1 => {
            join_segment(destination, base_name(path))
        }
        _ => destination.to_string(),
    }
}

/// Plan one move job per group.
#[must_use]
pub fn plan_move(request: &TransferRequest) -> Vec<PlannedJob> {
    let source_count = request.sources.len();
    partition(&request.sources)
        .into_iter()
        .enumerate()
        .map(|(position, group)| {
            let destination = resolve_destination(&request.destination, &group, source_count);
            let spec = JobSpec::Move(MoveJob {
                src_fs: group.source().to_string(),
                dst_fs: destination.clone(),
                create_empty_src_dirs: request.create_empty_src_dirs,
                delete_empty_dst_dirs: request.delete_empty_dst_dirs,
                config: request.config.clone(),
                filter: group_filter(&request.filter, &group),
                remote_options: request.remote_options.clone(),
            });
            PlannedJob {
                position,
                group,
                destination,
                spec,
            }
        })
        .collect()
}

/// Plan the single delete job.
#[must_use]
pub fn plan_delete(request: &DeleteRequest) -> Vec<PlannedJob> {
    let group = SourceGroup::Directory {
        path: request.fs.clone(),
    };
    let spec = JobSpec::Delete(DeleteJob {
        fs: request.fs.clone(),
        rm_dirs: request.rm_dirs,
        config: request.config.clone(),
        filter: request.filter.clone(),
    });
    vec![PlannedJob {
        position: 0,
        group,
        destination: String::new(),
        spec,
    }]
}
