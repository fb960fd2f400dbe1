//! Small groups and their hierarchy. These records carry no protected
//! fields; projection only drops members without a value.

use flock_core::{
  Field, Meaningful as _,
  record::{Category, Cluster, SmallGroup},
};

use crate::{
  Authorizer, ProjectionContext,
  rules::{Rule, present, project},
  wire::{CategoryInformation, ClusterInformation, SmallGroupInformation},
};

type GroupRule = Rule<SmallGroup, SmallGroupInformation>;
type ClusterRule = Rule<Cluster, ClusterInformation>;
type CategoryRule = Rule<Category, CategoryInformation>;

const SMALL_GROUP: &[GroupRule] = &[
  GroupRule::public(|g| g.name.is_meaningful(), |g, _, o| o.name = present(&g.name)),
  GroupRule::public(
    |g| g.description.is_meaningful(),
    |g, _, o| o.description = present(&g.description),
  ),
  GroupRule::public(
    |g| g.leader_id.is_meaningful(),
    |g, _, o| o.leader_id = present(&g.leader_id),
  ),
  GroupRule::public(
    |g| g.cluster_id.is_meaningful(),
    |g, _, o| o.cluster_id = present(&g.cluster_id),
  ),
  GroupRule::public(
    |g| g.meeting_day.is_meaningful(),
    |g, _, o| o.meeting_day = present(&g.meeting_day),
  ),
  GroupRule::public(
    |g| g.meeting_time.is_meaningful(),
    |g, _, o| o.meeting_time = present(&g.meeting_time),
  ),
  GroupRule::public(
    |g| g.member_count.is_meaningful(),
    |g, _, o| o.member_count = present(&g.member_count),
  ),
  GroupRule::public(|_| true, |g, _, o| o.active = present(&g.active)),
  GroupRule::public(
    |_| true,
    |g, ctx, o| o.navigation_url = Field::Present(ctx.small_group_url(g.group_id)),
  ),
];

const CLUSTER: &[ClusterRule] = &[
  ClusterRule::public(|c| c.name.is_meaningful(), |c, _, o| o.name = present(&c.name)),
  ClusterRule::public(
    |c| c.parent_cluster_id.is_meaningful(),
    |c, _, o| o.parent_cluster_id = present(&c.parent_cluster_id),
  ),
  ClusterRule::public(
    |c| c.category_id.is_meaningful(),
    |c, _, o| o.category_id = present(&c.category_id),
  ),
  ClusterRule::public(|c| c.level >= 0, |c, _, o| o.level = present(&c.level)),
  ClusterRule::public(
    |c| c.group_count.is_meaningful(),
    |c, _, o| o.group_count = present(&c.group_count),
  ),
];

const CATEGORY: &[CategoryRule] = &[
  CategoryRule::public(|c| c.name.is_meaningful(), |c, _, o| o.name = present(&c.name)),
  CategoryRule::public(
    |c| c.description.is_meaningful(),
    |c, _, o| o.description = present(&c.description),
  ),
  CategoryRule::public(
    |_| true,
    |c, _, o| o.allow_registrations = present(&c.allow_registrations),
  ),
];

pub async fn small_group_information<A: Authorizer>(
  group: Option<&SmallGroup>,
  ctx: &ProjectionContext,
  authorizer: &A,
) -> SmallGroupInformation {
  project(SMALL_GROUP, group, ctx, authorizer).await
}

pub async fn cluster_information<A: Authorizer>(
  cluster: Option<&Cluster>,
  ctx: &ProjectionContext,
  authorizer: &A,
) -> ClusterInformation {
  project(CLUSTER, cluster, ctx, authorizer).await
}

pub async fn category_information<A: Authorizer>(
  category: Option<&Category>,
  ctx: &ProjectionContext,
  authorizer: &A,
) -> CategoryInformation {
  project(CATEGORY, category, ctx, authorizer).await
}

#[cfg(test)]
mod tests {
  use std::sync::atomic::Ordering;

  use flock_core::record::NOT_FOUND;

  use super::*;
  use crate::{
    testing::{Allow, ctx},
    wire::Keyed as _,
  };

  fn group() -> SmallGroup {
    SmallGroup {
      group_id:     31,
      name:         "Tuesday Bible Study".into(),
      description:  String::new(),
      leader_id:    42,
      cluster_id:   5,
      meeting_day:  "Tuesday".into(),
      meeting_time: "19:00".into(),
      member_count: 12,
      active:       true,
    }
  }

  #[tokio::test]
  async fn groups_are_public() {
    let allow = Allow::nothing();
    let info = small_group_information(Some(&group()), &ctx(), &allow).await;

    assert_eq!(info.group_id, 31);
    assert_eq!(info.name, Field::Present("Tuesday Bible Study".to_string()));
    assert_eq!(info.leader_id, Field::Present(42));
    assert_eq!(
      info.navigation_url,
      Field::Present("https://church.example.org/groups/31".to_string())
    );
    assert!(info.description.is_absent());
    assert_eq!(allow.calls.load(Ordering::SeqCst), 0);
  }

  #[tokio::test]
  async fn missing_group_hierarchy_records() {
    let allow = Allow::nothing();
    assert_eq!(
      small_group_information(None, &ctx(), &allow).await,
      SmallGroupInformation::not_found()
    );
    assert_eq!(
      cluster_information(None, &ctx(), &allow).await,
      ClusterInformation::not_found()
    );
    assert_eq!(
      category_information(None, &ctx(), &allow).await,
      CategoryInformation::not_found()
    );
  }

  #[tokio::test]
  async fn top_level_cluster_has_no_parent() {
    let cluster = Cluster {
      cluster_id:        5,
      name:              "North Side".into(),
      parent_cluster_id: NOT_FOUND,
      category_id:       2,
      level:             0,
      group_count:       4,
    };
    let info = cluster_information(Some(&cluster), &ctx(), &Allow::nothing()).await;

    assert!(info.parent_cluster_id.is_absent());
    assert_eq!(info.category_id, Field::Present(2));
    assert_eq!(info.level, Field::Present(0));
  }

  #[tokio::test]
  async fn category_fields() {
    let category = Category {
      category_id:         2,
      name:                "Adult Groups".into(),
      description:         "  ".into(),
      allow_registrations: false,
    };
    let info =
      category_information(Some(&category), &ctx(), &Allow::nothing()).await;

    assert_eq!(
      serde_json::to_string(&info).unwrap(),
      r#"{"category_id":2,"name":"Adult Groups","allow_registrations":false}"#
    );
  }
}
