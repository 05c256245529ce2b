/*
 * Responsibility
 * - access token の claims 型 (authorized / user_id / exp)
 * - 署名済み payload との serde 契約と、user_id の数値変換
 *
 * Notes
 * - 発行側は `Claims` をそのまま serialize する
 * - 検証側は `WireClaims` で受けてから `Claims` に昇格させる
 *   (user_id が float で届くトークンも受け付けるため)
 * - exp も float を許す (小数部は切り捨て)
 */
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};

use crate::services::auth::error::TokenError;

/// Lifetime of every issued token.
pub const TOKEN_TTL_SECONDS: i64 = 60 * 60;

/// Verified, application-facing claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Claims {
    pub authorized: bool,
    pub user_id: u32,
    /// Unix seconds.
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: u32, issued_at: DateTime<Utc>) -> Self {
        Self {
            authorized: true,
            user_id,
            exp: (issued_at + Duration::seconds(TOKEN_TTL_SECONDS)).timestamp(),
        }
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// Claims exactly as they appear in a signed payload.
///
/// `user_id` stays a raw JSON number until the subject is actually requested.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireClaims {
    pub authorized: bool,
    pub user_id: serde_json::Number,
    #[serde(deserialize_with = "unix_seconds")]
    pub exp: i64,
}

fn unix_seconds<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let n = serde_json::Number::deserialize(deserializer)?;
    seconds_from_number(&n)
        .ok_or_else(|| de::Error::custom(format!("exp out of range: {}", n)))
}

fn seconds_from_number(n: &serde_json::Number) -> Option<i64> {
    if let Some(v) = n.as_i64() {
        return Some(v);
    }
    if n.is_u64() {
        return None;
    }

    let t = n.as_f64()?.trunc();
    // i64::MAX as f64 rounds up to 2^63, hence the strict bound
    (t.is_finite() && t >= i64::MIN as f64 && t < i64::MAX as f64).then_some(t as i64)
}

impl TryFrom<WireClaims> for Claims {
    type Error = TokenError;

    fn try_from(wire: WireClaims) -> Result<Self, Self::Error> {
        Ok(Self {
            authorized: wire.authorized,
            user_id: user_id_from_number(&wire.user_id)?,
            exp: wire.exp,
        })
    }
}

/// Integers must already fit in u32. Floats are rounded half-to-even first;
/// anything negative (including `-0.0`) or non-finite is rejected.
fn user_id_from_number(n: &serde_json::Number) -> Result<u32, TokenError> {
    if let Some(v) = n.as_u64() {
        return u32::try_from(v)
            .map_err(|_| TokenError::Malformed(format!("user_id out of range: {}", v)));
    }
    if n.is_i64() {
        return Err(TokenError::Malformed(format!("negative user_id: {}", n)));
    }

    let f = n
        .as_f64()
        .ok_or_else(|| TokenError::Malformed(format!("user_id is not a number: {}", n)))?;
    if !f.is_finite() || f.is_sign_negative() {
        return Err(TokenError::Malformed(format!("user_id out of range: {}", f)));
    }

    let rounded = f.round_ties_even();
    if rounded > u32::MAX as f64 {
        return Err(TokenError::Malformed(format!("user_id out of range: {}", f)));
    }
    Ok(rounded as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wire(user_id: serde_json::Value) -> WireClaims {
        serde_json::from_value(json!({
            "authorized": true,
            "user_id": user_id,
            "exp": 1_700_003_600_i64,
        }))
        .unwrap()
    }

    #[test]
    fn new_claims_expire_one_hour_after_issue() {
        let issued_at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let claims = Claims::new(7, issued_at);

        assert!(claims.authorized);
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.exp, 1_700_003_600);
        assert_eq!(
            claims.expires_at(),
            DateTime::from_timestamp(1_700_003_600, 0)
        );
    }

    #[test]
    fn serializes_as_flat_mapping() {
        let issued_at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let value = serde_json::to_value(Claims::new(42, issued_at)).unwrap();

        assert_eq!(
            value,
            json!({"authorized": true, "user_id": 42, "exp": 1_700_003_600_i64})
        );
    }

    #[test]
    fn integer_user_id_is_accepted() {
        let claims = Claims::try_from(wire(json!(42))).unwrap();
        assert_eq!(claims.user_id, 42);

        let claims = Claims::try_from(wire(json!(u32::MAX))).unwrap();
        assert_eq!(claims.user_id, u32::MAX);
    }

    #[test]
    fn float_user_id_is_rounded() {
        assert_eq!(Claims::try_from(wire(json!(42.0))).unwrap().user_id, 42);
        assert_eq!(Claims::try_from(wire(json!(41.6))).unwrap().user_id, 42);
        assert_eq!(Claims::try_from(wire(json!(42.4))).unwrap().user_id, 42);
        // ties go to the even neighbour
        assert_eq!(Claims::try_from(wire(json!(2.5))).unwrap().user_id, 2);
        assert_eq!(Claims::try_from(wire(json!(3.5))).unwrap().user_id, 4);
    }

    #[test]
    fn out_of_range_user_id_is_malformed() {
        for v in [
            json!(-1),
            json!(-0.4),
            json!(4_294_967_296_u64),
            json!(4_294_967_295.6),
            json!(1e20),
        ] {
            let err = Claims::try_from(wire(v.clone())).unwrap_err();
            assert!(matches!(err, TokenError::Malformed(_)), "{v}: {err:?}");
        }
    }

    #[test]
    fn float_exp_is_truncated_to_whole_seconds() {
        for (exp, expected) in [
            (json!(1_792_351_779.0), 1_792_351_779),
            (json!(1_792_351_779.9), 1_792_351_779),
            (json!(1_792_351_779_i64), 1_792_351_779),
        ] {
            let wire: WireClaims = serde_json::from_value(json!({
                "authorized": true,
                "user_id": 1,
                "exp": exp,
            }))
            .unwrap();
            assert_eq!(wire.exp, expected);
        }
    }

    #[test]
    fn unrepresentable_exp_does_not_deserialize() {
        for exp in [json!(u64::MAX), json!(1e300), json!("1792351779")] {
            let res = serde_json::from_value::<WireClaims>(json!({
                "authorized": true,
                "user_id": 1,
                "exp": exp,
            }));
            assert!(res.is_err(), "{exp}");
        }
    }

    #[test]
    fn non_numeric_user_id_does_not_deserialize() {
        let res = serde_json::from_value::<WireClaims>(json!({
            "authorized": true,
            "user_id": "42",
            "exp": 1_700_003_600_i64,
        }));
        assert!(res.is_err());
    }
}
