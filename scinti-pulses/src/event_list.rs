use crate::{
    config::{EventCount, PhysicsParameters},
    error::{InputError, Result},
};
use rand::{Rng, seq::IndexedRandom};
use rand_distr::{Distribution, Exp};
use scinti_common::{Frequency, Real, Time};
use tracing::{debug, info, instrument};

/// Fluorescence channel through which an event decays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecayChannel {
    Prompt,
    Delayed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub time: Time,
    /// Deposited energy in keV.
    pub energy: Real,
    pub channel: DecayChannel,
    /// Time constant of the channel.
    pub decay: Time,
}

/// Rejects negative or non-finite energies and arrival times, and arrival
/// sequences whose length differs from the energies'.
pub fn validate_input(
    energies: &[Real],
    arrivals: Option<&[Time]>,
) -> std::result::Result<(), InputError> {
    if let Some((index, &value)) = energies
        .iter()
        .enumerate()
        .find(|(_, e)| !(e.is_finite() && **e >= 0.0))
    {
        return Err(InputError::InvalidEnergy { index, value });
    }
    if let Some(arrivals) = arrivals {
        if arrivals.len() != energies.len() {
            return Err(InputError::LengthMismatch {
                energies: energies.len(),
                times: arrivals.len(),
            });
        }
        if let Some((index, &value)) = arrivals
            .iter()
            .enumerate()
            .find(|(_, t)| !(t.is_finite() && **t >= 0.0))
        {
            return Err(InputError::InvalidArrivalTime { index, value });
        }
    }
    Ok(())
}

/// Largest expected photoelectron count of a single event.
pub const MAX_PHOTOELECTRONS: Real = 1e18;

/// Rejects energies whose expected photoelectron count `E L rendQ` cannot be
/// counted in a `u64`.
pub fn validate_light_output(
    energies: &[Real],
    light_yield: Real,
    quantum_efficiency: Real,
) -> std::result::Result<(), InputError> {
    match energies
        .iter()
        .map(|energy| energy * light_yield * quantum_efficiency)
        .enumerate()
        .find(|(_, photoelectrons)| {
            !(photoelectrons.is_finite() && *photoelectrons <= MAX_PHOTOELECTRONS)
        })
    {
        Some((index, photoelectrons)) => Err(InputError::TooManyPhotoelectrons {
            index,
            photoelectrons,
            limit: MAX_PHOTOELECTRONS,
        }),
        None => Ok(()),
    }
}

/// Arrival times of a homogeneous Poisson process of `rate` on `[0, duration)`,
/// built from exponential inter-arrival times.
pub fn poisson_arrivals<R: Rng + ?Sized>(
    rate: Frequency,
    duration: Time,
    rng: &mut R,
) -> Result<Vec<Time>> {
    if rate <= 0.0 {
        return Ok(Vec::new());
    }
    let inter_arrival = Exp::new(rate)?;
    let mut arrivals = Vec::new();
    let mut time = inter_arrival.sample(rng);
    while time < duration {
        arrivals.push(time);
        time += inter_arrival.sample(rng);
    }
    Ok(arrivals)
}

/// Pairs each arrival time with an energy.
fn assign_energies<R: Rng + ?Sized>(
    energies: &[Real],
    arrivals: Vec<Time>,
    rng: &mut R,
) -> Vec<(Time, Real)> {
    if arrivals.len() > energies.len() {
        info!(
            "Bootstrapping {} energies to cover {} arrivals ({:.1}%)",
            energies.len(),
            arrivals.len(),
            100.0 * energies.len() as Real / arrivals.len() as Real
        );
        arrivals
            .into_iter()
            .filter_map(|time| energies.choose(&mut *rng).map(|&energy| (time, energy)))
            .collect()
    } else {
        arrivals.into_iter().zip(energies.iter().copied()).collect()
    }
}

/// Creates the time ordered events of one frame. Inputs must have passed [validate_input].
#[instrument(skip_all, level = "debug", fields(num_energies = energies.len()))]
pub fn generate_events<R: Rng + ?Sized>(
    energies: &[Real],
    arrivals: Option<&[Time]>,
    physics: &PhysicsParameters,
    rng: &mut R,
) -> Result<Vec<Event>> {
    let mut pairs: Vec<(Time, Real)> = match arrivals {
        Some(arrivals) => arrivals.iter().copied().zip(energies.iter().copied()).collect(),
        None if energies.is_empty() => Vec::new(),
        None => match physics.event_count {
            EventCount::Poisson => {
                let arrivals =
                    poisson_arrivals(physics.event_rate, physics.frame_duration, rng)?;
                assign_energies(energies, arrivals, rng)
            }
            EventCount::FromEnergies => energies
                .iter()
                .map(|&energy| (rng.random::<Real>() * physics.frame_duration, energy))
                .collect(),
        },
    };
    // Stable, so simultaneous events keep their input order
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

    if physics.single_pulse {
        pairs.truncate(1);
        if let Some(first) = pairs.first_mut() {
            first.0 = Time::default();
        }
    }

    let events: Vec<_> = pairs
        .into_iter()
        .map(|(time, energy)| {
            let channel = if rng.random_bool(physics.delayed_probability) {
                DecayChannel::Delayed
            } else {
                DecayChannel::Prompt
            };
            let decay = match channel {
                DecayChannel::Prompt => physics.prompt_decay,
                DecayChannel::Delayed => physics.delayed_decay,
            };
            Event {
                time,
                energy,
                channel,
                decay,
            }
        })
        .collect();
    debug!("Generated {} events", events.len());
    Ok(events)
}
