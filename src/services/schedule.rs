// src/services/schedule.rs
//
// Geração e evolução das tabelas de jogos. Funções puras: recebem a lista de
// participantes / rodadas e devolvem a nova estrutura, sem tocar no banco.

use std::collections::HashMap;

use rand::{seq::SliceRandom, Rng};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::tournament::{Match, Rounds, StandingEntry, TournamentType},
};

const POINTS_WIN: i64 = 3;
const POINTS_DRAW: i64 = 1;

/// Gera a tabela inicial conforme o tipo do torneio.
pub fn generate<R: Rng + ?Sized>(kind: TournamentType, participants: &[Uuid], rng: &mut R) -> Rounds {
    match kind {
        TournamentType::Championship => round_robin(participants),
        TournamentType::Elimination => single_elimination(participants, rng),
    }
}

/// Todos contra todos pelo método do círculo.
///
/// Com `n` ímpar entra um "bye" (`None`) para completar `n'` par. São `n' - 1`
/// rodadas; na rodada corrente a posição `i` enfrenta `n' - 1 - i`. Depois de
/// cada rodada todos giram uma posição, exceto o primeiro, de modo que cada
/// par se encontra exatamente uma vez. Partidas com o bye não são geradas.
pub fn round_robin(participants: &[Uuid]) -> Rounds {
    let mut slots: Vec<Option<Uuid>> = participants.iter().copied().map(Some).collect();
    if slots.len() % 2 != 0 {
        slots.push(None);
    }

    let n = slots.len();
    if n == 0 {
        return Vec::new();
    }

    let mut rounds = Vec::with_capacity(n - 1);
    for _ in 0..n - 1 {
        let round = (0..n / 2)
            .filter_map(|i| match (slots[i], slots[n - 1 - i]) {
                (Some(p1), Some(p2)) => Some(Match::new(Some(p1), Some(p2))),
                _ => None,
            })
            .collect();
        rounds.push(round);

        // O último vai para a posição 1; o primeiro fica fixo
        slots[1..].rotate_right(1);
    }
    rounds
}

/// Mata-mata simples: sorteio uniforme, pares consecutivos na primeira rodada
/// (o último recebe bye se `n` for ímpar) e rodadas seguintes pré-alocadas
/// vazias com `ceil(anterior / 2)` partidas até chegar na final.
pub fn single_elimination<R: Rng + ?Sized>(participants: &[Uuid], rng: &mut R) -> Rounds {
    let mut shuffled = participants.to_vec();
    shuffled.shuffle(rng);

    let first: Vec<Match> = shuffled
        .chunks(2)
        .map(|pair| Match::new(Some(pair[0]), pair.get(1).copied()))
        .collect();

    if first.is_empty() {
        return Vec::new();
    }

    let mut rounds = vec![first];
    loop {
        let previous = rounds.last().map_or(0, Vec::len);
        if previous <= 1 {
            break;
        }
        rounds.push(vec![Match::default(); previous.div_ceil(2)]);
    }
    rounds
}

/// Vencedor pelo placar: maior placar vence; empate ou placar ausente não tem vencedor.
pub fn match_winner(m: &Match) -> Option<Uuid> {
    match (m.score1, m.score2) {
        (Some(s1), Some(s2)) if s1 > s2 => m.player1,
        (Some(s1), Some(s2)) if s1 < s2 => m.player2,
        _ => None,
    }
}

// Partida sem adversário por construção da chave (não por indefinição).
// Na primeira rodada é a sobra de `n` ímpar; nas seguintes, quando a rodada
// anterior não tem a partida que alimentaria o segundo lugar.
fn is_structural_bye(rounds: &Rounds, round: usize, index: usize, m: &Match) -> bool {
    if round == 0 {
        return m.player1.is_some() && m.player2.is_none();
    }
    let feeder_len = rounds[round - 1].len();
    2 * index + 1 >= feeder_len && m.player2.is_none()
}

/// Avança os vencedores da rodada `round` para a rodada seguinte.
///
/// A partida `i` alimenta o lugar `i % 2` da partida `i / 2` da próxima rodada,
/// preservando a ordem. Partida sem vencedor deixa o lugar correspondente vazio.
pub fn advance_winners(rounds: &mut Rounds, round: usize) -> Result<(), AppError> {
    if round + 1 >= rounds.len() {
        return Err(AppError::InvalidInput(format!(
            "A rodada {} não tem rodada seguinte para avançar.",
            round
        )));
    }

    let winners: Vec<Option<Uuid>> = rounds[round]
        .iter()
        .enumerate()
        .map(|(i, m)| {
            if is_structural_bye(rounds, round, i, m) {
                m.player1
            } else {
                match_winner(m)
            }
        })
        .collect();

    let next = &mut rounds[round + 1];
    for (i, winner) in winners.into_iter().enumerate() {
        if let Some(slot) = next.get_mut(i / 2) {
            if i % 2 == 0 {
                slot.player1 = winner;
            } else {
                slot.player2 = winner;
            }
        }
    }
    Ok(())
}

/// Classificação automática do Championship: vitória 3, empate 1, derrota 0,
/// contando só partidas com os dois placares. Ordenada por pontos (desc);
/// empates mantêm a ordem dos participantes.
pub fn championship_standings(participants: &[Uuid], rounds: &Rounds) -> Vec<StandingEntry> {
    let mut table: Vec<StandingEntry> = Vec::with_capacity(participants.len());
    let mut index: HashMap<Uuid, usize> = HashMap::new();

    let mut slot_for = |table: &mut Vec<StandingEntry>, user_id: Uuid| -> usize {
        *index.entry(user_id).or_insert_with(|| {
            table.push(StandingEntry { user_id, points: 0 });
            table.len() - 1
        })
    };

    for id in participants {
        slot_for(&mut table, *id);
    }

    for m in rounds.iter().flatten() {
        let (Some(p1), Some(p2), Some(s1), Some(s2)) = (m.player1, m.player2, m.score1, m.score2) else {
            continue;
        };
        let i1 = slot_for(&mut table, p1);
        let i2 = slot_for(&mut table, p2);
        if s1 > s2 {
            table[i1].points += POINTS_WIN;
        } else if s1 < s2 {
            table[i2].points += POINTS_WIN;
        } else {
            table[i1].points += POINTS_DRAW;
            table[i2].points += POINTS_DRAW;
        }
    }

    table.sort_by(|a, b| b.points.cmp(&a.points));
    table
}

/// Campeão do mata-mata: vencedor da final (rodada de uma partida só).
pub fn elimination_winner(rounds: &Rounds) -> Option<Uuid> {
    match rounds.last() {
        Some(final_round) if final_round.len() == 1 => match_winner(&final_round[0]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;

    fn ids(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    fn scored(p1: Uuid, p2: Uuid, s1: u32, s2: u32) -> Match {
        Match { player1: Some(p1), player2: Some(p2), score1: Some(s1), score2: Some(s2) }
    }

    fn unordered_pairs(rounds: &Rounds) -> Vec<(Uuid, Uuid)> {
        rounds
            .iter()
            .flatten()
            .map(|m| {
                let (a, b) = (m.player1.unwrap(), m.player2.unwrap());
                if a < b { (a, b) } else { (b, a) }
            })
            .collect()
    }

    #[test]
    fn round_robin_meets_every_pair_once() {
        for n in 2..=9 {
            let players = ids(n);
            let rounds = round_robin(&players);

            let effective = if n % 2 == 0 { n } else { n + 1 };
            assert_eq!(rounds.len(), effective - 1, "n = {}", n);

            let pairs = unordered_pairs(&rounds);
            let unique: HashSet<_> = pairs.iter().copied().collect();
            assert_eq!(pairs.len(), n * (n - 1) / 2, "n = {}", n);
            assert_eq!(unique.len(), pairs.len(), "par repetido com n = {}", n);
        }
    }

    #[test]
    fn round_robin_nobody_plays_twice_in_a_round() {
        let players = ids(6);
        for round in round_robin(&players) {
            let mut seen = HashSet::new();
            for m in round {
                assert!(seen.insert(m.player1.unwrap()));
                assert!(seen.insert(m.player2.unwrap()));
            }
        }
    }

    #[test]
    fn round_robin_first_round_pairs_ends_inward() {
        let p = ids(4);
        let rounds = round_robin(&p);
        assert_eq!(rounds[0], vec![Match::new(Some(p[0]), Some(p[3])), Match::new(Some(p[1]), Some(p[2]))]);
        // Depois da rotação: [p0, p3, p1, p2]
        assert_eq!(rounds[1], vec![Match::new(Some(p[0]), Some(p[2])), Match::new(Some(p[3]), Some(p[1]))]);
    }

    #[test]
    fn round_robin_starts_unscored_and_handles_tiny_inputs() {
        assert!(round_robin(&[]).is_empty());

        let solo = round_robin(&ids(1));
        assert_eq!(solo.len(), 1);
        assert!(solo[0].is_empty());

        assert!(round_robin(&ids(5)).iter().flatten().all(|m| m.score1.is_none() && m.score2.is_none()));
    }

    #[test]
    fn elimination_bracket_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in 2..=17usize {
            let rounds = single_elimination(&ids(n), &mut rng);
            assert_eq!(rounds[0].len(), n.div_ceil(2), "n = {}", n);

            let expected_rounds = (n as f64).log2().ceil() as usize;
            assert_eq!(rounds.len(), expected_rounds, "n = {}", n);
            assert_eq!(rounds.last().unwrap().len(), 1);

            for later in &rounds[1..] {
                assert!(later.iter().all(|m| *m == Match::default()));
            }
        }
    }

    #[test]
    fn elimination_with_five_players_is_three_two_one() {
        let mut rng = StdRng::seed_from_u64(1);
        let players = ids(5);
        let rounds = single_elimination(&players, &mut rng);

        let sizes: Vec<usize> = rounds.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![3, 2, 1]);
        assert_eq!(rounds[0][2].player2, None);

        // Sorteio é uma permutação dos participantes
        let drawn: HashSet<Uuid> = rounds[0].iter().flat_map(|m| [m.player1, m.player2]).flatten().collect();
        assert_eq!(drawn, players.into_iter().collect());
    }

    #[test]
    fn elimination_single_participant_gets_a_bye_final() {
        let mut rng = StdRng::seed_from_u64(3);
        let solo = ids(1);
        let rounds = single_elimination(&solo, &mut rng);
        assert_eq!(rounds, vec![vec![Match::new(Some(solo[0]), None)]]);
    }

    #[test]
    fn match_winner_rules() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        assert_eq!(match_winner(&scored(a, b, 3, 1)), Some(a));
        assert_eq!(match_winner(&scored(a, b, 0, 2)), Some(b));
        assert_eq!(match_winner(&scored(a, b, 2, 2)), None);
        assert_eq!(match_winner(&Match { score1: Some(1), ..Match::new(Some(a), Some(b)) }), None);
    }

    #[test]
    fn advance_fills_slots_in_order_and_leaves_undecided_empty() {
        let p = ids(8);
        let mut rounds: Rounds = vec![
            vec![
                scored(p[0], p[1], 2, 1),
                scored(p[2], p[3], 0, 1),
                scored(p[4], p[5], 1, 1),
                Match::new(Some(p[6]), Some(p[7])),
            ],
            vec![Match::default(); 2],
            vec![Match::default(); 1],
        ];

        advance_winners(&mut rounds, 0).unwrap();

        assert_eq!(rounds[1][0], Match::new(Some(p[0]), Some(p[3])));
        assert_eq!(rounds[1][1], Match::new(None, None));
    }

    #[test]
    fn advance_carries_byes_forward() {
        let p = ids(5);
        let mut rounds: Rounds = vec![
            vec![scored(p[0], p[1], 3, 0), scored(p[2], p[3], 1, 4), Match::new(Some(p[4]), None)],
            vec![Match::default(); 2],
            vec![Match::default(); 1],
        ];

        advance_winners(&mut rounds, 0).unwrap();
        assert_eq!(rounds[1][0], Match::new(Some(p[0]), Some(p[3])));
        assert_eq!(rounds[1][1], Match::new(Some(p[4]), None));

        rounds[1][0].score1 = Some(5);
        rounds[1][0].score2 = Some(2);
        advance_winners(&mut rounds, 1).unwrap();
        assert_eq!(rounds[2][0], Match::new(Some(p[0]), Some(p[4])));
    }

    #[test]
    fn advance_rejects_final_round() {
        let p = ids(2);
        let mut rounds: Rounds = vec![vec![scored(p[0], p[1], 1, 0)]];
        assert!(advance_winners(&mut rounds, 0).is_err());
        assert!(advance_winners(&mut rounds, 5).is_err());
    }

    #[test]
    fn standings_award_three_one_zero() {
        let p = ids(3);
        let rounds: Rounds = vec![
            vec![scored(p[0], p[1], 2, 0)],
            vec![scored(p[1], p[2], 1, 1)],
            vec![Match::new(Some(p[0]), Some(p[2]))],
        ];

        let table = championship_standings(&p, &rounds);
        assert_eq!(
            table,
            vec![
                StandingEntry { user_id: p[0], points: 3 },
                StandingEntry { user_id: p[1], points: 1 },
                StandingEntry { user_id: p[2], points: 1 },
            ]
        );
    }

    #[test]
    fn standings_list_everyone_even_without_games() {
        let p = ids(4);
        let table = championship_standings(&p, &round_robin(&p));
        assert_eq!(table.len(), 4);
        assert!(table.iter().all(|e| e.points == 0));
    }

    #[test]
    fn elimination_winner_needs_decided_final() {
        let p = ids(4);
        let mut rounds: Rounds = vec![
            vec![scored(p[0], p[1], 1, 0), scored(p[2], p[3], 0, 1)],
            vec![Match::new(Some(p[0]), Some(p[3]))],
        ];
        assert_eq!(elimination_winner(&rounds), None);

        rounds[1][0].score1 = Some(2);
        rounds[1][0].score2 = Some(2);
        assert_eq!(elimination_winner(&rounds), None);

        rounds[1][0].score2 = Some(3);
        assert_eq!(elimination_winner(&rounds), Some(p[3]));
    }
}
