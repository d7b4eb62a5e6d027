use crate::domain::{
    shared::errors::DomainError,
    tracker::{
        entity::{CountryStat, RouteStat, TrackerEntry, TrackerTotals, Visit},
        repository::TrackerRepository,
    },
};
use async_trait::async_trait;
use sqlx::{PgPool, types::ipnetwork::IpNetwork};

pub struct SqlxTrackerRepository {
    pub pool: PgPool,
}

impl SqlxTrackerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TrackerRepository for SqlxTrackerRepository {
    async fn record(&self, visit: Visit) -> Result<(), DomainError> {
        let (good, bad) = if visit.good { (1_i64, 0_i64) } else { (0, 1) };
        sqlx::query(
            "INSERT INTO trackers (ip, country, city, times_visited, routes, user_agent, \
                                   is_first_visit, good_requests, bad_requests) \
             VALUES ($1, $2, $3, 1, jsonb_build_object($4::text, 1), $5, TRUE, $6, $7) \
             ON CONFLICT (ip) DO UPDATE SET \
                country = EXCLUDED.country, \
                city = EXCLUDED.city, \
                times_visited = trackers.times_visited + 1, \
                routes = jsonb_set(trackers.routes, ARRAY[$4::text], \
                    to_jsonb(COALESCE((trackers.routes ->> $4::text)::bigint, 0) + 1)), \
                user_agent = EXCLUDED.user_agent, \
                is_first_visit = FALSE, \
                good_requests = trackers.good_requests + $6, \
                bad_requests = trackers.bad_requests + $7, \
                last_visit_at = NOW()",
        )
        .bind(IpNetwork::from(visit.ip))
        .bind(&visit.country)
        .bind(&visit.city)
        .bind(&visit.route)
        .bind(&visit.user_agent)
        .bind(good)
        .bind(bad)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn totals(&self) -> Result<TrackerTotals, DomainError> {
        let totals = sqlx::query_as::<_, TrackerTotals>(
            "SELECT COALESCE(SUM(good_requests), 0)::bigint AS total_good_requests, \
                    COALESCE(SUM(bad_requests), 0)::bigint AS total_bad_requests, \
                    COALESCE(SUM(times_visited), 0)::bigint AS total_requests, \
                    COUNT(*) AS unique_ips \
             FROM trackers",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(totals)
    }

    async fn country_stats(&self) -> Result<Vec<CountryStat>, DomainError> {
        let rows = sqlx::query_as::<_, CountryStat>(
            "SELECT country, COALESCE(SUM(times_visited), 0)::bigint AS visits, COUNT(*) AS unique_ips \
             FROM trackers GROUP BY country ORDER BY visits DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn top_routes(&self, limit: i64) -> Result<Vec<RouteStat>, DomainError> {
        let rows = sqlx::query_as::<_, RouteStat>(
            "SELECT r.key AS route, SUM(r.value::bigint)::bigint AS total \
             FROM trackers t, jsonb_each_text(t.routes) r \
             GROUP BY r.key ORDER BY total DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<TrackerEntry>, DomainError> {
        let rows = sqlx::query_as::<_, TrackerEntry>(
            "SELECT host(ip) AS ip, country, city, times_visited, routes, user_agent, \
                    is_first_visit, good_requests, bad_requests, first_visit_at, last_visit_at \
             FROM trackers ORDER BY last_visit_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn count(&self) -> Result<i64, DomainError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM trackers")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }
}
